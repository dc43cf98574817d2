//! Filter trees.
//!
//! A filter is a tree of field conditions (a field plus an operator map) and
//! `AND`/`OR`/`NOT` groups. Trees come from the JSON wire format or from the
//! builder methods.
//!
//! ## Usage
//!
//! ```rust
//! use pgwhere_core::filter::{FieldCondition, FilterNode};
//! use serde_json::json;
//!
//! // Builder API
//! let filter = FilterNode::or(vec![
//!     FieldCondition::new("status").with("eq", "active").into(),
//!     FieldCondition::new("age").with("gte", 18).with("lt", 65).into(),
//! ]);
//! assert_eq!(filter.condition_count(), 3);
//!
//! // Wire format
//! let parsed = FilterNode::from_json(&json!({"name": {"eq": "Alice"}})).unwrap();
//! assert_eq!(parsed.condition_count(), 1);
//! ```

mod builders;
mod parse;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::LiteralValue;

/// Logical combinator of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    /// All children must hold.
    And,
    /// At least one child must hold.
    Or,
    /// Negates its single child.
    Not,
}

impl Combinator {
    /// Wire key and SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }

    /// Parses a reserved combinator key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operators applied to one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    /// JSON keys leading to the field.
    pub keys: Vec<String>,
    /// Operator name (as received) to value, in client order.
    pub operators: IndexMap<String, LiteralValue>,
}

/// Combinator applied to child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCondition {
    /// How children combine.
    pub combinator: Combinator,
    /// Child nodes.
    pub children: Vec<FilterNode>,
}

/// A node of the filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    /// Leaf condition.
    Field(FieldCondition),
    /// Nested group.
    Group(GroupCondition),
}

impl FieldCondition {
    /// Dotted field name.
    #[must_use]
    pub fn name(&self) -> String {
        self.keys.join(".")
    }
}

impl FilterNode {
    /// Returns true for a group without children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Group(group) if group.children.is_empty())
    }

    /// Nesting depth; a lone field condition has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Field(_) => 1,
            Self::Group(group) => {
                1 + group
                    .children
                    .iter()
                    .map(Self::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Total number of operator entries across all field conditions.
    #[must_use]
    pub fn condition_count(&self) -> usize {
        match self {
            Self::Field(field) => field.operators.len(),
            Self::Group(group) => group.children.iter().map(Self::condition_count).sum(),
        }
    }

    /// Longest list value anywhere in the tree.
    #[must_use]
    pub fn max_list_len(&self) -> usize {
        match self {
            Self::Field(field) => field
                .operators
                .values()
                .filter_map(LiteralValue::as_list)
                .map(<[LiteralValue]>::len)
                .max()
                .unwrap_or(0),
            Self::Group(group) => group
                .children
                .iter()
                .map(Self::max_list_len)
                .max()
                .unwrap_or(0),
        }
    }
}

impl From<FieldCondition> for FilterNode {
    fn from(field: FieldCondition) -> Self {
        Self::Field(field)
    }
}

impl From<GroupCondition> for FilterNode {
    fn from(group: GroupCondition) -> Self {
        Self::Group(group)
    }
}
