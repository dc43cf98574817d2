//! # `pgwhere` Core
//!
//! Typed SQL predicate compiler for PostgreSQL JSONB documents.
//!
//! `pgwhere` turns a structured filter (field names mapped to operator maps,
//! combined with `AND`/`OR`/`NOT` groups) into one parameterized boolean
//! expression ready to splice into a `WHERE` clause.
//!
//! ## Features
//!
//! - **Type detection**: static hints, field-name vocabulary and value sniffing
//!   pick one family per field (IP, MAC, ltree, daterange, vector, ...)
//! - **Strategy precedence**: a fixed table resolves each operator, most specific
//!   family first, so generic text operators never claim typed fields
//! - **Injection safe**: literals are always bound parameters; identifiers and
//!   JSON keys are quoted
//! - **Placeholder parity**: fragments carry their parameters, so the
//!   placeholder count always matches
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let compiled = pgwhere_core::compile(&json!({
//!     "age": {"gte": 18, "lt": 65},
//!     "ip": {"insubnet": "192.168.0.0/16"}
//! }))
//! .unwrap()
//! .unwrap();
//!
//! assert_eq!(
//!     compiled.sql,
//!     "(data ->> 'age')::numeric >= %s::numeric AND (data ->> 'age')::numeric < %s::numeric \
//!      AND (data ->> 'ip')::inet <<= %s::inet"
//! );
//! assert_eq!(compiled.params.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // i64 -> f64 for numeric literals
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::manual_let_else)]

pub mod config;
pub mod detect;
pub mod error;
#[cfg(test)]
mod error_tests;
pub mod field_path;
#[cfg(test)]
mod field_path_tests;
pub mod filter;
pub mod operators;
pub mod sql;
pub mod value;
pub mod where_clause;

pub use config::{CompilerConfig, ConfigError};
pub use detect::{detect, detect_with_implied, FieldTypeFamily, TypeHint};
pub use error::{CompileError, Result};
pub use field_path::FieldPath;
pub use filter::{Combinator, FieldCondition, FilterNode, GroupCondition};
pub use operators::registry::StrategyRegistry;
pub use operators::{Operator, OperatorStrategy, StrategyKind};
pub use sql::{PlaceholderStyle, SqlFragment};
pub use value::{LiteralValue, SqlParam};
pub use where_clause::{CompiledWhere, WhereClauseBuilder};

/// Compiles a JSON filter with default settings.
///
/// Returns `Ok(None)` for an empty filter.
///
/// # Errors
///
/// Returns a [`CompileError`] for invalid filters.
pub fn compile(filter: &serde_json::Value) -> Result<Option<CompiledWhere>> {
    WhereClauseBuilder::new().build_json(filter)
}
