//! Builder methods for filter trees.

use indexmap::IndexMap;

use super::{Combinator, FieldCondition, FilterNode, GroupCondition};
use crate::value::LiteralValue;

impl FieldCondition {
    /// Creates a condition without operators on a dotted field (`profile.city`).
    #[must_use]
    pub fn new(field: &str) -> Self {
        Self::nested(field.split('.'))
    }

    /// Creates a condition on an explicit key sequence.
    #[must_use]
    pub fn nested<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            operators: IndexMap::new(),
        }
    }

    /// Adds an operator; a repeated operator replaces the previous value.
    #[must_use]
    pub fn with(mut self, operator: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        self.operators.insert(operator.into(), value.into());
        self
    }
}

impl GroupCondition {
    /// Creates a group.
    #[must_use]
    pub fn new(combinator: Combinator, children: Vec<FilterNode>) -> Self {
        Self {
            combinator,
            children,
        }
    }
}

impl FilterNode {
    /// The empty filter (an `AND` with no children).
    #[must_use]
    pub fn empty() -> Self {
        Self::and(Vec::new())
    }

    /// Creates an `AND` group.
    #[must_use]
    pub fn and(children: Vec<FilterNode>) -> Self {
        Self::Group(GroupCondition::new(Combinator::And, children))
    }

    /// Creates an `OR` group.
    #[must_use]
    pub fn or(children: Vec<FilterNode>) -> Self {
        Self::Group(GroupCondition::new(Combinator::Or, children))
    }

    /// Creates a `NOT` group around one child.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(child: FilterNode) -> Self {
        Self::Group(GroupCondition::new(Combinator::Not, vec![child]))
    }

    /// Shorthand for a single-operator field condition.
    #[must_use]
    pub fn field(field: &str, operator: &str, value: impl Into<LiteralValue>) -> Self {
        Self::Field(FieldCondition::new(field).with(operator, value))
    }
}
