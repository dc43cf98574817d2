//! SQL composition primitives shared by every strategy.
//!
//! A [`SqlFragment`] is a sequence of trusted SQL chunks and bound parameter
//! chunks. Placeholders are only produced at [`SqlFragment::render`] time, one per
//! parameter chunk, so the placeholder count and the parameter list cannot drift.

use serde::{Deserialize, Serialize};

use crate::value::SqlParam;

/// How positional placeholders are spelled in the rendered SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `%s` placeholders (psycopg / DB-API "format" paramstyle).
    #[default]
    Format,
    /// `$1, $2, ...` placeholders (PostgreSQL native protocol).
    Numbered,
}

impl PlaceholderStyle {
    /// Config spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Numbered => "numbered",
        }
    }
}

impl std::fmt::Display for PlaceholderStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlaceholderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "format" | "%s" => Ok(Self::Format),
            "numbered" | "dollar" | "$n" => Ok(Self::Numbered),
            other => Err(format!(
                "unknown placeholder style '{other}', expected 'format' or 'numbered'"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Chunk {
    Sql(String),
    Param(SqlParam),
}

/// Composed SQL expression with the parameters it binds.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    chunks: Vec<Chunk>,
    predicate: bool,
}

/// Rendered SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSql {
    /// SQL with placeholders.
    pub sql: String,
    /// Parameters in placeholder order.
    pub params: Vec<SqlParam>,
}

impl SqlFragment {
    /// Creates an empty predicate fragment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunks: Vec::new(),
            predicate: true,
        }
    }

    /// Creates a fragment from trusted SQL text.
    ///
    /// Only compiler-generated text belongs here: keywords, operators, casts,
    /// quoted identifiers and quoted JSON keys. Client values go through
    /// [`SqlFragment::param`].
    #[must_use]
    pub fn sql(text: impl Into<String>) -> Self {
        let mut fragment = Self::new();
        fragment.push_sql(text);
        fragment
    }

    /// Creates a fragment holding a single bound parameter.
    #[must_use]
    pub fn param(value: impl Into<SqlParam>) -> Self {
        let mut fragment = Self::new();
        fragment.push_param(value);
        fragment
    }

    /// Appends trusted SQL text.
    pub fn push_sql(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if text.is_empty() {
            return self;
        }
        if let Some(Chunk::Sql(last)) = self.chunks.last_mut() {
            last.push_str(&text);
        } else {
            self.chunks.push(Chunk::Sql(text));
        }
        self
    }

    /// Appends a bound parameter.
    pub fn push_param(&mut self, value: impl Into<SqlParam>) -> &mut Self {
        self.chunks.push(Chunk::Param(value.into()));
        self
    }

    /// Appends a bound parameter followed by a `::cast` (no cast when `cast` is empty).
    pub fn push_cast_param(&mut self, value: impl Into<SqlParam>, cast: &str) -> &mut Self {
        self.push_param(value);
        if !cast.is_empty() {
            self.push_sql(format!("::{cast}"));
        }
        self
    }

    /// Appends another fragment, keeping its parameters in order.
    pub fn append(&mut self, other: SqlFragment) -> &mut Self {
        self.predicate &= other.predicate;
        for chunk in other.chunks {
            match chunk {
                Chunk::Sql(text) => {
                    self.push_sql(text);
                }
                Chunk::Param(p) => {
                    self.push_param(p);
                }
            }
        }
        self
    }

    /// Joins fragments with a separator such as `" AND "`.
    #[must_use]
    pub fn join(fragments: impl IntoIterator<Item = SqlFragment>, separator: &str) -> Self {
        let mut joined = Self::new();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                joined.push_sql(separator);
            }
            joined.append(fragment);
        }
        joined
    }

    /// Wraps the fragment in parentheses.
    #[must_use]
    pub fn parenthesized(self) -> Self {
        let mut wrapped = Self::sql("(");
        wrapped.append(self);
        wrapped.push_sql(")");
        wrapped
    }

    /// Marks the fragment as a scalar (non-boolean) expression.
    #[must_use]
    pub fn into_scalar(mut self) -> Self {
        self.predicate = false;
        self
    }

    /// Returns false when the fragment contains a scalar expression such as a
    /// vector distance.
    #[must_use]
    pub const fn is_predicate(&self) -> bool {
        self.predicate
    }

    /// Returns true when no SQL has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates over the bound parameters in order.
    pub fn params(&self) -> impl Iterator<Item = &SqlParam> {
        self.chunks.iter().filter_map(|chunk| match chunk {
            Chunk::Param(p) => Some(p),
            Chunk::Sql(_) => None,
        })
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params().count()
    }

    /// Renders the fragment with the given placeholder style.
    ///
    /// In [`PlaceholderStyle::Format`] every literal `%` in trusted SQL is doubled
    /// so the driver's `%`-formatting leaves it intact.
    #[must_use]
    pub fn render(&self, style: PlaceholderStyle) -> RenderedSql {
        let mut sql = String::new();
        let mut params = Vec::with_capacity(self.chunks.len() / 2);

        for chunk in &self.chunks {
            match chunk {
                Chunk::Sql(text) => match style {
                    PlaceholderStyle::Format => sql.push_str(&text.replace('%', "%%")),
                    PlaceholderStyle::Numbered => sql.push_str(text),
                },
                Chunk::Param(p) => {
                    params.push(p.clone());
                    match style {
                        PlaceholderStyle::Format => sql.push_str("%s"),
                        PlaceholderStyle::Numbered => {
                            sql.push('$');
                            sql.push_str(&params.len().to_string());
                        }
                    }
                }
            }
        }

        RenderedSql { sql, params }
    }
}

impl Default for SqlFragment {
    fn default() -> Self {
        Self::new()
    }
}

/// Keywords that must be quoted when used as identifiers.
const RESERVED: &[&str] = &[
    "all", "and", "any", "array", "as", "asc", "both", "case", "cast", "check", "collate",
    "column", "constraint", "create", "default", "desc", "distinct", "do", "else", "end",
    "except", "false", "for", "foreign", "from", "grant", "group", "having", "in", "into",
    "is", "join", "leading", "limit", "not", "null", "offset", "on", "only", "or", "order",
    "primary", "references", "select", "table", "then", "to", "trailing", "true", "union",
    "unique", "user", "using", "when", "where", "with",
];

/// Quotes a SQL identifier (column name) when needed.
///
/// Simple lowercase identifiers that are not reserved words are returned bare;
/// everything else is double-quoted with embedded quotes doubled.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    let mut chars = name.chars();
    let simple = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if simple && !RESERVED.contains(&name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Quotes a trusted constant as a SQL string literal.
#[must_use]
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Escapes `\`, `%` and `_` so a value matches literally inside a LIKE pattern.
#[must_use]
pub fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Counts positional placeholders in rendered SQL.
///
/// For [`PlaceholderStyle::Format`] an escaped `%%` is not a placeholder. For
/// [`PlaceholderStyle::Numbered`] a `$n` inside a quoted literal or identifier
/// (a JSON key such as `'$1'`) is not one either.
#[must_use]
pub fn count_placeholders(sql: &str, style: PlaceholderStyle) -> usize {
    let bytes = sql.as_bytes();
    let mut count = 0;
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match (style, quote) {
            (PlaceholderStyle::Format, _) => {
                if b == b'%' {
                    if bytes.get(i + 1) == Some(&b's') {
                        count += 1;
                    }
                    i += 2;
                    continue;
                }
            }
            (PlaceholderStyle::Numbered, Some(q)) => {
                if b == q {
                    quote = None;
                }
            }
            (PlaceholderStyle::Numbered, None) => match b {
                b'\'' | b'"' => quote = Some(b),
                b'$' if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => count += 1,
                _ => {}
            },
        }
        i += 1;
    }
    count
}
