//! Conversion from the JSON wire format.
//!
//! ```text
//! {"age": {"gte": 18}, "OR": [{"status": {"eq": "a"}}, {"status": {"eq": "b"}}]}
//! {"profile": {"city": {"eq": "Paris"}}}
//! {"NOT": {"deleted": {"eq": true}}}
//! ```

use serde_json::{Map, Value};

use super::{Combinator, FieldCondition, FilterNode, GroupCondition};
use crate::detect::FieldTypeFamily;
use crate::error::{CompileError, Result};
use crate::operators::Operator;
use crate::value::LiteralValue;

const ROOT: &str = "<root>";

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

impl FilterNode {
    /// Parses a filter tree from its JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::TypeMismatch`] for structural errors and
    /// [`CompileError::UnsupportedOperator`] for keys that mix operators and
    /// nested fields.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(CompileError::type_mismatch(ROOT, "object", json_kind(value)));
        };

        if map.len() == 1 {
            if let Some((key, inner)) = map.iter().next() {
                if let Some(combinator) = Combinator::from_key(key) {
                    return parse_group(combinator, inner);
                }
            }
        }
        parse_object(map).map(FilterNode::and)
    }

    /// Parses a filter tree from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Json`] for invalid JSON, otherwise as
    /// [`FilterNode::from_json`].
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }
}

impl TryFrom<&Value> for FilterNode {
    type Error = CompileError;

    fn try_from(value: &Value) -> Result<Self> {
        Self::from_json(value)
    }
}

/// Every entry of an object becomes one node.
fn parse_object(map: &Map<String, Value>) -> Result<Vec<FilterNode>> {
    map.iter()
        .map(|(key, value)| match Combinator::from_key(key) {
            Some(combinator) => parse_group(combinator, value),
            None => parse_field(vec![key.clone()], value),
        })
        .collect()
}

/// An object used as a group element: one entry is that node, several are ANDed.
fn parse_element(value: &Value, combinator: Combinator) -> Result<FilterNode> {
    let Value::Object(map) = value else {
        return Err(CompileError::type_mismatch(
            combinator.as_str(),
            "filter object",
            json_kind(value),
        ));
    };

    let mut children = parse_object(map)?;
    if children.len() == 1 {
        Ok(children.remove(0))
    } else {
        Ok(FilterNode::and(children))
    }
}

fn parse_group(combinator: Combinator, value: &Value) -> Result<FilterNode> {
    match combinator {
        Combinator::And | Combinator::Or => {
            let Value::Array(items) = value else {
                return Err(CompileError::type_mismatch(
                    combinator.as_str(),
                    "list of filter objects",
                    json_kind(value),
                ));
            };
            let children = items
                .iter()
                .map(|item| parse_element(item, combinator))
                .collect::<Result<Vec<_>>>()?;
            Ok(FilterNode::Group(GroupCondition::new(combinator, children)))
        }
        Combinator::Not => {
            let child = match value {
                Value::Array(items) if items.len() == 1 => parse_element(&items[0], combinator)?,
                Value::Array(items) => {
                    return Err(CompileError::type_mismatch(
                        "NOT",
                        "exactly one filter object",
                        format!("list of {}", items.len()),
                    ));
                }
                other => parse_element(other, combinator)?,
            };
            Ok(FilterNode::not(child))
        }
    }
}

fn parse_field(keys: Vec<String>, value: &Value) -> Result<FilterNode> {
    let dotted = keys.join(".");

    let Value::Object(map) = value else {
        return Err(CompileError::type_mismatch(
            dotted,
            "operator object",
            json_kind(value),
        ));
    };
    if map.is_empty() {
        return Err(CompileError::type_mismatch(
            dotted,
            "non-empty operator map",
            "empty object",
        ));
    }

    let operator_keys = map.keys().filter(|k| Operator::is_operator_name(k)).count();

    if operator_keys == map.len() {
        let operators = map
            .iter()
            .map(|(name, v)| (name.clone(), LiteralValue::from(v)))
            .collect();
        return Ok(FilterNode::Field(FieldCondition { keys, operators }));
    }

    if operator_keys > 0 {
        let stray = map
            .keys()
            .find(|k| !Operator::is_operator_name(k))
            .map_or_else(String::new, Clone::clone);
        return Err(unsupported(dotted, stray));
    }

    // No operator keys: a nested path such as {"profile": {"city": {...}}}
    let mut children = Vec::with_capacity(map.len());
    for (key, inner) in map {
        if !inner.is_object() {
            return Err(unsupported(dotted, key.clone()));
        }
        let mut nested = keys.clone();
        nested.push(key.clone());
        children.push(parse_field(nested, inner)?);
    }

    if children.len() == 1 {
        Ok(children.remove(0))
    } else {
        Ok(FilterNode::and(children))
    }
}

fn unsupported(field: String, operator: String) -> CompileError {
    CompileError::UnsupportedOperator {
        field,
        operator,
        family: FieldTypeFamily::Unknown,
    }
}
