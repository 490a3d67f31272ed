// tests/iterator_tests.rs

use pick_lang::ast::{BooleanExpression, BooleanOperator, BooleanStatement, WrapperBooleanStatement};
use pick_lang::{BooleanStatementCallback, BooleanStatementIterator, Parser, Value};

/// Records every event as a short string.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

fn label(statement: &BooleanStatement) -> String {
    let name = match &statement.expression {
        BooleanExpression::Comparison(c) => c.left.as_field().map(|f| f.to_string()).unwrap_or_default(),
        BooleanExpression::Typed(t) => format!("{}:{}", t.field.as_field().unwrap(), t.type_name),
        BooleanExpression::Wrapper(_) => "group".to_string(),
    };
    if statement.negated {
        format!("!{}", name)
    } else {
        name
    }
}

impl BooleanStatementCallback for Recorder {
    fn on_boolean_statement(&mut self, statement: &BooleanStatement, operator: BooleanOperator) {
        self.events
            .push(format!("stmt {} {}", label(statement), operator.as_str()));
    }

    fn on_last_boolean_statement(&mut self, statement: &BooleanStatement) {
        self.events.push(format!("last {}", label(statement)));
    }

    fn on_wrapper_opened(&mut self, statement: &BooleanStatement, _wrapper: &WrapperBooleanStatement) {
        self.events.push(format!("open {}", label(statement)));
    }

    fn on_wrapper_closed(&mut self, statement: &BooleanStatement, _wrapper: &WrapperBooleanStatement) {
        self.events.push(format!("close {}", label(statement)));
    }
}

fn record(text: &str, arg_count: i64) -> Vec<String> {
    let args = (0..arg_count).map(Value::Integer).collect::<Vec<_>>();
    let query = Parser::new(args)
        .parse(text)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", text, e));
    let mut recorder = Recorder::default();
    BooleanStatementIterator::iterate(query.command().if_clause().unwrap(), &mut recorder);
    recorder.events
}

#[test]
fn test_single_statement() {
    assert_eq!(record("PICK Foo IF a=?", 1), vec!["last a"]);
}

#[test]
fn test_flat_chain_reports_operators() {
    assert_eq!(
        record("PICK Foo IF a=? OR b=? AND !c=?", 3),
        vec!["stmt a OR", "stmt b AND", "last !c"]
    );
}

#[test]
fn test_group_events_surround_children() {
    assert_eq!(
        record("PICK Foo IF (a=? AND b=?)", 2),
        vec!["open group", "stmt a AND", "last b", "close group", "last group"]
    );
}

#[test]
fn test_group_in_the_middle() {
    assert_eq!(
        record("PICK Foo IF a=? OR !(b=? AND c=?) AND d=?", 4),
        vec![
            "stmt a OR",
            "open !group",
            "stmt b AND",
            "last c",
            "close !group",
            "stmt !group AND",
            "last d",
        ]
    );
}

#[test]
fn test_nested_groups() {
    assert_eq!(
        record("PICK Shape s IF ((s TYPED Circle) OR s.r>?)", 1),
        vec![
            "open group",
            "open group",
            "last s:Circle",
            "close group",
            "stmt group OR",
            "last s.r",
            "close group",
            "last group",
        ]
    );
}

#[test]
fn test_default_wrapper_hooks_are_optional() {
    struct Leaves(Vec<bool>);

    impl BooleanStatementCallback for Leaves {
        fn on_boolean_statement(&mut self, statement: &BooleanStatement, _: BooleanOperator) {
            self.0.push(statement.as_wrapper().is_some());
        }
        fn on_last_boolean_statement(&mut self, statement: &BooleanStatement) {
            self.0.push(statement.as_wrapper().is_some());
        }
    }

    let query = Parser::new(vec![Value::Integer(1), Value::Integer(2)])
        .parse("PICK Foo IF (a=?) OR b=?")
        .unwrap();
    let mut leaves = Leaves(Vec::new());
    BooleanStatementIterator::iterate(query.command().if_clause().unwrap(), &mut leaves);
    // the grouped statement, the group itself, then b
    assert_eq!(leaves.0, vec![false, true, false]);
}

#[test]
fn test_callback_as_trait_object() {
    let query = Parser::new(vec![Value::Integer(1)]).parse("PICK Foo IF a=?").unwrap();
    let mut recorder = Recorder::default();
    let callback: &mut dyn BooleanStatementCallback = &mut recorder;
    BooleanStatementIterator::iterate(query.command().if_clause().unwrap(), callback);
    assert_eq!(recorder.events, vec!["last a"]);
}
