//! Filter tree to SQL `WHERE` fragment.
//!
//! The builder walks the tree depth-first, left to right. Each field condition is
//! typed once, each operator is resolved against the strategy registry, and the
//! resulting fragments are joined with the minimum parentheses that keep
//! `AND`/`OR` precedence intact:
//!
//! - a lone child is never wrapped
//! - an `OR` of two or more terms is always wrapped
//! - an `AND` of two or more terms is wrapped only inside an `OR`
//! - nested `AND`s flatten
//! - `NOT` always wraps its child: `NOT (...)`

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{CompilerConfig, LimitsConfig};
use crate::detect::{detect_with_implied, lookup_hint, FieldTypeFamily, TypeHint};
use crate::error::{CompileError, Result};
use crate::field_path::{FieldPath, DEFAULT_COLUMN};
use crate::filter::{Combinator, FieldCondition, FilterNode, GroupCondition};
use crate::operators::registry::StrategyRegistry;
use crate::operators::{BuildContext, Operator};
use crate::sql::{PlaceholderStyle, SqlFragment};
use crate::value::{LiteralValue, SqlParam};

/// Compiled SQL fragment with its positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledWhere {
    /// SQL to splice after `WHERE`.
    pub sql: String,
    /// Parameters in placeholder order.
    pub params: Vec<SqlParam>,
    /// False when a scalar vector-distance term is included.
    pub is_predicate: bool,
}

/// Compiles filter trees into parameterized SQL.
///
/// Holds configuration only; every `build` call allocates its own state, so one
/// builder can serve many threads.
///
/// # Examples
///
/// ```rust
/// use pgwhere_core::WhereClauseBuilder;
/// use serde_json::json;
///
/// let builder = WhereClauseBuilder::new();
/// let compiled = builder
///     .build_json(&json!({"name": {"eq": "Alice"}}))
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(compiled.sql, "(data ->> 'name') = %s");
/// assert_eq!(compiled.params.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct WhereClauseBuilder {
    registry: Cow<'static, StrategyRegistry>,
    column: String,
    jsonb: bool,
    placeholder: PlaceholderStyle,
    limits: LimitsConfig,
    hints: IndexMap<String, TypeHint>,
}

impl Default for WhereClauseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WhereClauseBuilder {
    /// Creates a builder with default settings and the standard registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Cow::Borrowed(StrategyRegistry::standard()),
            column: DEFAULT_COLUMN.to_string(),
            jsonb: true,
            placeholder: PlaceholderStyle::default(),
            limits: LimitsConfig::default(),
            hints: IndexMap::new(),
        }
    }

    /// Creates a builder from configuration.
    #[must_use]
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self {
            registry: Cow::Borrowed(StrategyRegistry::standard()),
            column: config.document.column.clone(),
            jsonb: config.document.jsonb,
            placeholder: config.sql.placeholder,
            limits: config.limits,
            hints: config.hints.clone(),
        }
    }

    /// Uses a custom strategy registry.
    #[must_use]
    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = Cow::Owned(registry);
        self
    }

    /// Sets the document column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Switches between JSONB document mode and typed-column mode.
    #[must_use]
    pub fn with_jsonb(mut self, jsonb: bool) -> Self {
        self.jsonb = jsonb;
        self
    }

    /// Sets the placeholder style.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Sets the complexity limits.
    #[must_use]
    pub fn with_limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Declares a static type for a field (dotted path or leaf name).
    #[must_use]
    pub fn with_hint(mut self, field: impl Into<String>, hint: TypeHint) -> Self {
        self.hints.insert(field.into(), hint);
        self
    }

    /// Compiles a filter tree.
    ///
    /// Returns `Ok(None)` when the tree contributes no SQL: an empty root, or
    /// only null operator values.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] met in depth-first order.
    pub fn build(&self, root: &FilterNode) -> Result<Option<CompiledWhere>> {
        self.check_limits(root)?;

        let fragment = match root {
            FilterNode::Group(group) if group.children.is_empty() => None,
            node => self.compile_node(node, "", None)?,
        };

        let Some(fragment) = fragment else {
            debug!("filter compiled to no predicate");
            return Ok(None);
        };

        let rendered = fragment.render(self.placeholder);
        debug!(
            conditions = root.condition_count(),
            params = rendered.params.len(),
            is_predicate = fragment.is_predicate(),
            "compiled filter"
        );

        Ok(Some(CompiledWhere {
            sql: rendered.sql,
            params: rendered.params,
            is_predicate: fragment.is_predicate(),
        }))
    }

    /// Parses and compiles a JSON filter.
    ///
    /// # Errors
    ///
    /// Returns parse or compile errors.
    pub fn build_json(&self, filter: &Value) -> Result<Option<CompiledWhere>> {
        self.build(&FilterNode::from_json(filter)?)
    }

    /// Parses and compiles a JSON filter given as text.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Json`] for invalid JSON, otherwise as
    /// [`WhereClauseBuilder::build`].
    pub fn build_str(&self, filter: &str) -> Result<Option<CompiledWhere>> {
        self.build(&FilterNode::from_json_str(filter)?)
    }

    /// Compiles a single `(field, operator, value)` leaf.
    ///
    /// Unlike [`WhereClauseBuilder::build`] this is meant for scalar expressions
    /// such as a vector distance used in `ORDER BY`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::TypeMismatch`] for a null value, otherwise the
    /// errors of path parsing, resolution and the strategy.
    pub fn build_expression(
        &self,
        field: &str,
        operator: &str,
        value: impl Into<LiteralValue>,
    ) -> Result<CompiledWhere> {
        let value = value.into();
        if value.is_null() {
            return Err(CompileError::type_mismatch(field, "non-null value", "null"));
        }

        let condition = FieldCondition::new(field).with(operator, value);
        let fragment = SqlFragment::join(self.compile_field(&condition)?, " AND ");
        let rendered = fragment.render(self.placeholder);

        Ok(CompiledWhere {
            sql: rendered.sql,
            params: rendered.params,
            is_predicate: fragment.is_predicate(),
        })
    }

    fn check_limits(&self, root: &FilterNode) -> Result<()> {
        let checks = [
            ("depth", self.limits.max_depth, root.depth()),
            ("conditions", self.limits.max_conditions, root.condition_count()),
            ("list length", self.limits.max_list_len, root.max_list_len()),
        ];
        for (what, limit, actual) in checks {
            if actual > limit {
                return Err(CompileError::TooComplex {
                    what,
                    limit,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// `position` is the node's place in the tree (`AND[1]`), empty at the root.
    fn compile_node(
        &self,
        node: &FilterNode,
        position: &str,
        parent: Option<Combinator>,
    ) -> Result<Option<SqlFragment>> {
        match node {
            FilterNode::Field(field) => Ok(join_terms(
                self.compile_field(field)?,
                Combinator::And,
                parent,
            )),
            FilterNode::Group(group) => {
                let label = if position.is_empty() {
                    group.combinator.as_str().to_string()
                } else {
                    format!("{position}.{}", group.combinator)
                };
                self.compile_group(group, &label, parent)
            }
        }
    }

    fn compile_group(
        &self,
        group: &GroupCondition,
        label: &str,
        parent: Option<Combinator>,
    ) -> Result<Option<SqlFragment>> {
        if group.children.is_empty() {
            return Err(CompileError::EmptyGroup {
                path: label.to_string(),
            });
        }

        if group.combinator == Combinator::Not {
            if group.children.len() != 1 {
                return Err(CompileError::type_mismatch(
                    label,
                    "exactly one child",
                    format!("{} children", group.children.len()),
                ));
            }
            let child = self.compile_node(
                &group.children[0],
                &format!("{label}[0]"),
                Some(Combinator::Not),
            )?;
            return Ok(child.map(|inner| {
                let mut negated = SqlFragment::sql("NOT ");
                negated.append(inner.parenthesized());
                negated
            }));
        }

        let mut terms = Vec::with_capacity(group.children.len());
        for (i, child) in group.children.iter().enumerate() {
            self.push_terms(child, &format!("{label}[{i}]"), group.combinator, &mut terms)?;
        }
        Ok(join_terms(terms, group.combinator, parent))
    }

    /// Compiles `node` as a child of a `combinator` group, flattening nested ANDs.
    fn push_terms(
        &self,
        node: &FilterNode,
        position: &str,
        combinator: Combinator,
        terms: &mut Vec<SqlFragment>,
    ) -> Result<()> {
        match node {
            FilterNode::Field(field) if combinator == Combinator::And => {
                terms.extend(self.compile_field(field)?);
            }
            FilterNode::Group(group)
                if combinator == Combinator::And
                    && group.combinator == Combinator::And
                    && !group.children.is_empty() =>
            {
                let label = format!("{position}.AND");
                for (i, child) in group.children.iter().enumerate() {
                    self.push_terms(child, &format!("{label}[{i}]"), Combinator::And, terms)?;
                }
            }
            other => {
                if let Some(fragment) = self.compile_node(other, position, Some(combinator))? {
                    terms.push(fragment);
                }
            }
        }
        Ok(())
    }

    /// One fragment per non-null operator, in client order.
    fn compile_field(&self, condition: &FieldCondition) -> Result<Vec<SqlFragment>> {
        let path =
            FieldPath::new(condition.keys.iter().cloned())?.with_column(self.column.as_str());
        let name = path.dotted();

        if condition.operators.is_empty() {
            return Err(CompileError::type_mismatch(
                name,
                "non-empty operator map",
                "empty map",
            ));
        }

        let live: Vec<(&str, &LiteralValue)> = condition
            .operators
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(op, value)| (op.as_str(), value))
            .collect();
        if live.is_empty() {
            trace!(field = %name, "all operator values are null, skipping field");
            return Ok(Vec::new());
        }

        let hint = lookup_hint(&self.hints, &name);
        let implied = self.implied_family(&live);
        let family = detect_with_implied(&name, sample_value(&live), hint, implied);
        trace!(field = %name, %family, hinted = hint.is_some(), "detected field family");

        let ctx = BuildContext::new(&path, family, self.jsonb);
        live.into_iter()
            .map(|(operator, value)| {
                let (op, strategy) = self.registry.resolve(&name, operator, family)?;
                strategy.build(&ctx, op, value)
            })
            .collect()
    }

    /// Family implied when every non-flag operator is exclusive to the same one.
    fn implied_family(&self, operators: &[(&str, &LiteralValue)]) -> Option<FieldTypeFamily> {
        let mut implied = None;
        for &(name, _) in operators {
            let op = Operator::parse(name)?;
            if op == Operator::IsNull {
                continue;
            }
            let family = self.registry.implied_family(op)?;
            if implied.is_some_and(|seen| seen != family) {
                return None;
            }
            implied = Some(family);
        }
        implied
    }
}

/// Representative value for type detection.
///
/// Prefers the first operator that is neither a flag (`isnull`, `isprivate`, ...)
/// nor `in`/`notin`; otherwise the first element of a membership list. Flags
/// alone give nothing to sniff.
fn sample_value<'v>(operators: &[(&str, &'v LiteralValue)]) -> Option<&'v LiteralValue> {
    let mut membership = None;
    for &(name, value) in operators {
        match Operator::parse(name) {
            Some(op) if op.takes_flag() => {}
            Some(Operator::In | Operator::NotIn) => {
                if membership.is_none() {
                    membership = value.as_list().and_then(<[LiteralValue]>::first);
                }
            }
            _ => return Some(value),
        }
    }
    membership
}

/// Joins terms of one group, wrapping per the precedence rules.
fn join_terms(
    mut terms: Vec<SqlFragment>,
    combinator: Combinator,
    parent: Option<Combinator>,
) -> Option<SqlFragment> {
    match terms.len() {
        0 => None,
        1 => terms.pop(),
        _ => {
            let (separator, wrap) = match combinator {
                Combinator::Or => (" OR ", parent != Some(Combinator::Not)),
                _ => (" AND ", parent == Some(Combinator::Or)),
            };
            let joined = SqlFragment::join(terms, separator);
            Some(if wrap { joined.parenthesized() } else { joined })
        }
    }
}
