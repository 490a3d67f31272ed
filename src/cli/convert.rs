//! JSON <-> query conversion utilities

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;

use super::CliError;
use crate::ast::{BooleanExpression, BooleanStatement, Command, ComparisonType, ContextVariable};
use crate::{Query, Value};

/// Convert serde_json::Value to a query argument
pub fn json_to_value(v: serde_json::Value) -> Result<Value, CliError> {
    Ok(match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Ok(d) = Decimal::from_str(&n.to_string()) {
                Value::Decimal(d)
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| CliError::UnsupportedArgument(n.to_string()))?;
                Value::Float(f)
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(
            arr.into_iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_json::Value::Object(_) => {
            return Err(CliError::UnsupportedArgument("object".to_string()));
        }
    })
}

/// Parse a JSON array of query arguments
pub fn parse_args(json_str: &str) -> Result<Vec<Value>, CliError> {
    match serde_json::from_str(json_str)? {
        serde_json::Value::Array(items) => items.into_iter().map(json_to_value).collect(),
        serde_json::Value::Null => Err(CliError::InvalidArguments("null")),
        serde_json::Value::Bool(_) => Err(CliError::InvalidArguments("boolean")),
        serde_json::Value::Number(_) => Err(CliError::InvalidArguments("number")),
        serde_json::Value::String(_) => Err(CliError::InvalidArguments("string")),
        serde_json::Value::Object(_) => Err(CliError::InvalidArguments("object")),
    }
}

/// Convert a query argument to serde_json::Value
///
/// Decimals are written as strings to keep every digit.
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Decimal(d) => serde_json::Value::String(d.to_string()),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
    }
}

/// Structural JSON view of a parsed query
pub fn query_to_json(query: &Query) -> serde_json::Value {
    let command = query.command();
    let mut out = json!({
        "command": match command {
            Command::Pick(_) => "PICK",
            Command::Count(_) => "COUNT",
        },
        "type": command.attribute_holder_name(),
        "alias": command.alias(),
        "if": command.if_clause().map(chain_to_json),
    });

    if let Command::Pick(pick) = command {
        out["orderBy"] = match &pick.ordering {
            Some(ordering) => ordering
                .iter()
                .map(|key| {
                    json!({
                        "field": key.field.to_string(),
                        "direction": key.direction.as_str(),
                    })
                })
                .collect(),
            None => serde_json::Value::Null,
        };
        out["limit"] = json!(pick.limit);
        out["offset"] = json!(pick.offset);
    }
    out
}

fn chain_to_json(root: &BooleanStatement) -> serde_json::Value {
    root.chain()
        .map(|statement| {
            let mut node = match &statement.expression {
                BooleanExpression::Comparison(c) => json!({
                    "left": variable_to_json(&c.left),
                    "comparison": comparison_name(c.comparison_type),
                    "right": variable_to_json(&c.right),
                }),
                BooleanExpression::Typed(t) => json!({
                    "field": variable_to_json(&t.field),
                    "typed": t.type_name,
                }),
                BooleanExpression::Wrapper(w) => json!({
                    "group": chain_to_json(&w.wrapped),
                }),
            };
            node["negated"] = json!(statement.negated);
            if let Some(op) = statement.next_operator() {
                node["next"] = json!(op.as_str());
            }
            node
        })
        .collect()
}

fn variable_to_json(variable: &ContextVariable) -> serde_json::Value {
    match variable {
        ContextVariable::Field(path) => json!({ "field": path.to_string() }),
        ContextVariable::Parameter(arg) => json!({
            "argument": arg.position,
            "value": value_to_json(&arg.value),
        }),
    }
}

fn comparison_name(comparison_type: ComparisonType) -> &'static str {
    match comparison_type {
        ComparisonType::Equal => "EQUAL",
        ComparisonType::Greater => "GREATER",
        ComparisonType::GreaterEqual => "GREATER_EQUAL",
        ComparisonType::Lower => "LOWER",
        ComparisonType::LowerEqual => "LOWER_EQUAL",
        ComparisonType::InRange => "INRANGE",
    }
}
