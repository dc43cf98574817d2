//! Field references into the document column.
//!
//! Supports dot notation (`profile.city`) for nested keys. A [`FieldPath`] knows
//! how to render itself as the SQL *text path* used on the left-hand side of every
//! predicate:
//!
//! - JSONB mode: `(data ->> 'name')`, `(data -> 'profile' ->> 'city')`
//! - column mode: `(name)`, `("Profile" ->> 'city')`

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, Result};
use crate::sql::{quote_ident, quote_literal};

/// Default document column.
pub const DEFAULT_COLUMN: &str = "data";

/// Path to a field inside the document column.
///
/// # Examples
///
/// ```rust
/// use pgwhere_core::FieldPath;
///
/// let path = FieldPath::parse("profile.city").unwrap();
/// assert_eq!(path.keys().len(), 2);
/// assert_eq!(path.text_sql(true), "(data -> 'profile' ->> 'city')");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFieldPath")]
pub struct FieldPath {
    keys: Vec<String>,
    column: String,
}

/// Unvalidated serialized form; goes through [`FieldPath::new`].
#[derive(Deserialize)]
struct RawFieldPath {
    keys: Vec<String>,
    #[serde(default = "default_column")]
    column: String,
}

fn default_column() -> String {
    DEFAULT_COLUMN.to_string()
}

impl TryFrom<RawFieldPath> for FieldPath {
    type Error = CompileError;

    fn try_from(raw: RawFieldPath) -> Result<Self> {
        let path = Self::new(raw.keys)?;
        if raw.column.is_empty() || raw.column.contains('\0') {
            return Err(CompileError::InvalidFieldPath {
                path: path.dotted(),
                reason: "invalid column name".to_string(),
            });
        }
        Ok(path.with_column(raw.column))
    }
}

impl FieldPath {
    /// Creates a path from keys, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidFieldPath`] when there are no keys, or a key
    /// is empty or contains NUL.
    pub fn new<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let dotted = keys.join(".");

        if keys.is_empty() {
            return Err(CompileError::InvalidFieldPath {
                path: dotted,
                reason: "path has no keys".to_string(),
            });
        }
        for key in &keys {
            if key.is_empty() {
                return Err(CompileError::InvalidFieldPath {
                    path: dotted,
                    reason: "empty key".to_string(),
                });
            }
            if key.contains('\0') {
                return Err(CompileError::InvalidFieldPath {
                    path: dotted.replace('\0', "\\0"),
                    reason: "key contains NUL".to_string(),
                });
            }
        }

        Ok(Self {
            keys,
            column: DEFAULT_COLUMN.to_string(),
        })
    }

    /// Parses a dotted path such as `"profile.city"`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidFieldPath`] for an empty path or an empty
    /// segment (`a..b`).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        Self::new(input.split('.'))
    }

    /// Returns a copy of this path owned by another column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// The ordered JSON keys.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The owning column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The last key, used for name-based type detection.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.keys.last().map_or("", String::as_str)
    }

    /// Returns true if the path has a single key.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.keys.len() == 1
    }

    /// Dotted form, e.g. `profile.city`.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.keys.join(".")
    }

    /// Renders the parenthesized text path.
    ///
    /// With `jsonb` the whole path lives inside the document column. Without it the
    /// first key is a real column and any remaining keys index into it.
    #[must_use]
    pub fn text_sql(&self, jsonb: bool) -> String {
        let (base, rest) = if jsonb {
            (quote_ident(&self.column), &self.keys[..])
        } else {
            (quote_ident(&self.keys[0]), &self.keys[1..])
        };

        let mut sql = String::with_capacity(base.len() + rest.len() * 12 + 2);
        sql.push('(');
        sql.push_str(&base);
        for (i, key) in rest.iter().enumerate() {
            let arrow = if i + 1 == rest.len() { " ->> " } else { " -> " };
            sql.push_str(arrow);
            sql.push_str(&quote_literal(key));
        }
        sql.push(')');
        sql
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

impl std::str::FromStr for FieldPath {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
