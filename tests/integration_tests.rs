// tests/integration_tests.rs

use pick_lang::cli::{self, CheckOptions, CheckResult, CliError};
use pick_lang::{describe, parse, to_query_string, Parser, ParserConfig, Value};

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Integer).collect()
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_query_string_round_trip() {
    let cases = [
        ("PICK Foo", 0),
        ("COUNT Bar b IF b.age<?", 1),
        ("PICK Bar b IF b.name=? ORDERBY b.name LIMIT 10 OFFSET 5", 1),
        ("PICK Foo IF a=? OR (b=? AND c=?) AND d=?", 4),
        ("PICK Foo IF !(a=? OR !b>=?)", 2),
        ("PICK Shape s IF !s TYPED Circle AND s.r INRANGE ?", 1),
        ("PICK Order o ORDERBY o.total DESC, o.id LIMIT 0", 0),
    ];
    for (text, arg_count) in cases {
        let args: Vec<Value> = (0..arg_count).map(Value::Integer).collect();
        let query = parse(text, args.clone()).unwrap();
        let rendered = to_query_string(&query);
        assert_eq!(rendered, text);
        assert_eq!(parse(&rendered, args).unwrap(), query, "for {}", text);
    }
}

#[test]
fn test_query_string_normalizes() {
    let query = parse("PICK  Foo f   IF f.a != ?  ORDERBY f.a ASC", ints(&[1])).unwrap();
    assert_eq!(to_query_string(&query), "PICK Foo f IF !f.a=? ORDERBY f.a");
}

#[test]
fn test_describe_inlines_arguments() {
    let query = parse(
        "PICK Bar b IF b.name=? AND b.age>=? LIMIT 3",
        vec![Value::from("lonesome foo"), Value::Integer(21)],
    )
    .unwrap();
    assert_eq!(
        describe(&query),
        "PICK Bar b\n  IF b.name = \"lonesome foo\" AND b.age >= 21\n  LIMIT 3"
    );
}

#[test]
fn test_incremental_fragments() {
    let mut parser = Parser::new(ints(&[1, 2]));
    parser.reparse("PICK Foo f ").unwrap();
    parser.reparse("IF f.a=? ").unwrap();
    let query = parser.parse("AND f.b=?").unwrap();

    let whole = parse("PICK Foo f IF f.a=? AND f.b=?", ints(&[1, 2])).unwrap();
    assert_eq!(query, whole);
}

#[test]
fn test_fragment_diagnostics() {
    let mut parser = Parser::new(ints(&[]));
    parser.reparse("PICK Foo ").unwrap();
    assert_eq!(parser.parsed_so_far(), "");

    let err = parser.parse("IF )").unwrap_err();
    assert_eq!(err.offset, 12);
    assert_eq!(err.parsed, "IF )");
    assert_eq!(parser.parsed_so_far(), "");
}

#[test]
fn test_error_message() {
    let err = parse("PICK Foo IF a=?)", ints(&[1])).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("offset 15"), "{}", message);
    assert!(message.contains("PICK Foo IF a=?)"), "{}", message);
}

#[test]
fn test_parser_reusable_after_error() {
    let mut parser = Parser::with_config(ints(&[1]), ParserConfig::default());
    assert!(parser.parse("PICK Foo IF").is_err());
    let query = parser.parse("PICK Foo IF a=?").unwrap();
    assert!(query.command().if_clause().is_some());
}

// ============================================================================
// CLI
// ============================================================================

fn check(query: &str, args: Option<&str>) -> CheckOptions {
    CheckOptions {
        query: query.to_string(),
        args: args.map(str::to_string),
        ..CheckOptions::default()
    }
}

#[test]
fn test_check_syntax_only() {
    let options = CheckOptions {
        syntax_only: true,
        ..check("PICK Foo IF a=?", Some("[1]"))
    };
    assert!(matches!(cli::execute_check(&options), Ok(CheckResult::SyntaxValid)));

    let options = CheckOptions {
        syntax_only: true,
        ..check("PICK Foo IF a=?", None)
    };
    assert!(matches!(cli::execute_check(&options), Err(CliError::Parse(_))));
}

#[test]
fn test_check_outline() {
    match cli::execute_check(&check("COUNT Foo f IF f.a=?", Some(r#"["x"]"#))) {
        Ok(CheckResult::Outline(outline)) => assert_eq!(outline, "COUNT Foo f\n  IF f.a = \"x\""),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_check_json() {
    let options = CheckOptions {
        json: true,
        ..check(
            "PICK Order o IF o.total>? AND (o.state=? OR !o TYPED Draft) ORDERBY o.total DESC LIMIT 5",
            Some(r#"[19.99, "open"]"#),
        )
    };
    let json = match cli::execute_check(&options) {
        Ok(CheckResult::Json(json)) => json,
        other => panic!("unexpected result: {:?}", other),
    };

    assert_eq!(json["command"], "PICK");
    assert_eq!(json["type"], "Order");
    assert_eq!(json["alias"], "o");
    assert_eq!(json["limit"], 5);
    assert!(json["offset"].is_null());
    assert_eq!(json["orderBy"][0]["field"], "o.total");
    assert_eq!(json["orderBy"][0]["direction"], "DESC");

    let first = &json["if"][0];
    assert_eq!(first["comparison"], "GREATER");
    assert_eq!(first["right"]["argument"], 0);
    assert_eq!(first["right"]["value"], "19.99");
    assert_eq!(first["next"], "AND");

    let group = &json["if"][1]["group"];
    assert_eq!(group[0]["right"]["value"], "open");
    assert_eq!(group[1]["typed"], "Draft");
    assert_eq!(group[1]["negated"], true);
}

#[test]
fn test_check_respects_limits() {
    let options = CheckOptions {
        config: ParserConfig::default().with_max_group_depth(0),
        ..check("PICK Foo IF (a=?)", Some("[1]"))
    };
    assert!(matches!(cli::execute_check(&options), Err(CliError::Parse(_))));
}

#[test]
fn test_check_rejects_bad_arguments() {
    assert!(matches!(
        cli::execute_check(&check("PICK Foo", Some("42"))),
        Err(CliError::InvalidArguments("number"))
    ));
}

#[test]
fn test_docs() {
    let overview = cli::get_docs_overview();
    for category in ["grammar", "expressions", "arguments", "ordering"] {
        assert!(overview.contains(category));
        assert!(cli::get_doc_category(category).is_ok());
    }
    assert!(cli::get_doc_category("ORDERBY").unwrap().contains("LIMIT"));
    assert!(matches!(
        cli::get_doc_category("udf"),
        Err(CliError::UnknownCategory(_))
    ));
}
