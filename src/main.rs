use clap::{Parser as ClapParser, Subcommand};
use pick_lang::ParserConfig;
use pick_lang::cli::{self, CheckOptions, CheckResult, CliError};
use pick_lang::config::{DEFAULT_MAX_GROUP_DEPTH, DEFAULT_MAX_INPUT_LEN};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "pick")]
#[command(about = "Pick - parse and inspect PICK/COUNT record queries")]
#[command(version)]
struct Cli {
    /// Log parser activity to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print its structure
    Check {
        /// The query to parse
        query: String,

        /// JSON array of query arguments (reads from stdin if not provided)
        #[arg(short, long)]
        args: Option<String>,

        /// Print the parsed query as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax
        #[arg(long)]
        syntax_only: bool,

        /// Maximum group nesting depth
        #[arg(long, env = "PICK_MAX_DEPTH", default_value_t = DEFAULT_MAX_GROUP_DEPTH)]
        max_depth: usize,

        /// Maximum query length in characters (0 = unlimited)
        #[arg(long, env = "PICK_MAX_LEN", default_value_t = DEFAULT_MAX_INPUT_LEN)]
        max_len: usize,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'pick docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            query,
            args,
            json,
            pretty,
            syntax_only,
            max_depth,
            max_len,
        } => {
            let config = ParserConfig::default()
                .with_max_group_depth(max_depth)
                .with_max_input_len(max_len);
            run_check(query, args, json, pretty, syntax_only, config)
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "pick_lang=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run_check(
    query: String,
    args: Option<String>,
    json: bool,
    pretty: bool,
    syntax_only: bool,
    config: ParserConfig,
) -> Result<(), CliError> {
    let args = match args {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (!buffer.trim().is_empty()).then_some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        query,
        args,
        json,
        syntax_only,
        config,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Outline(outline) => println!("{}", outline),
        CheckResult::Json(value) => {
            let rendered = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            }?;
            println!("{}", rendered);
        }
    }
    Ok(())
}
