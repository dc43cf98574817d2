//! Operator vocabulary and per-family SQL strategies.
//!
//! A strategy is plain static data: the operators it declares, a family
//! predicate and a build function. [`registry::StrategyRegistry`] tries them in a
//! fixed precedence order, most type-specific first.

pub mod boolean;
pub mod comparison;
pub mod date_range;
pub mod list;
pub mod ltree;
pub mod mac_address;
pub mod network;
pub mod null_check;
pub mod numeric;
pub mod pattern;
pub mod registry;
pub mod vector;

#[cfg(test)]
mod operators_tests;

use serde::Serialize;

use crate::detect::FieldTypeFamily;
use crate::error::{CompileError, Result};
use crate::field_path::FieldPath;
use crate::sql::SqlFragment;
use crate::value::{LiteralValue, SqlParam};

macro_rules! operators {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Filter operator.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operator {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl Operator {
            /// Every operator in the vocabulary.
            pub const ALL: &'static [Operator] = &[$(Operator::$variant),+];

            /// Canonical wire name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Operator::$variant => $name),+
                }
            }

            fn from_canonical(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Operator::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

operators! {
    Eq => "eq",
    Neq => "neq",
    Gt => "gt",
    Gte => "gte",
    Lt => "lt",
    Lte => "lte",
    In => "in",
    NotIn => "notin",
    IsNull => "isnull",
    Contains => "contains",
    IContains => "icontains",
    StartsWith => "startswith",
    IStartsWith => "istartswith",
    EndsWith => "endswith",
    IEndsWith => "iendswith",
    Matches => "matches",
    IMatches => "imatches",
    NotMatches => "not_matches",
    Like => "like",
    ILike => "ilike",
    InSubnet => "insubnet",
    ContainsSubnet => "containssubnet",
    InRange => "inrange",
    IsPrivate => "isprivate",
    IsPublic => "ispublic",
    IsIpv4 => "isipv4",
    IsIpv6 => "isipv6",
    IsLoopback => "isloopback",
    Overlaps => "overlaps",
    StrictLeft => "strictleft",
    StrictRight => "strictright",
    AncestorOf => "ancestor_of",
    DescendantOf => "descendant_of",
    DepthEq => "depth_eq",
    DepthGt => "depth_gt",
    DepthLt => "depth_lt",
    MatchesLquery => "matches_lquery",
    MatchesLtxtquery => "matches_ltxtquery",
    MatchesAnyLquery => "matches_any_lquery",
    ContainsDate => "contains_date",
    Adjacent => "adjacent",
    StrictlyLeft => "strictly_left",
    StrictlyRight => "strictly_right",
    NotLeft => "not_left",
    NotRight => "not_right",
    CosineDistance => "cosine_distance",
    L2Distance => "l2_distance",
    InnerProduct => "inner_product",
    L1Distance => "l1_distance",
    HammingDistance => "hamming_distance",
    JaccardDistance => "jaccard_distance",
}

impl Operator {
    /// Parses a wire name, accepting the aliases `ne`, `nin` and `not_in`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ne" => Some(Self::Neq),
            "nin" | "not_in" => Some(Self::NotIn),
            other => Self::from_canonical(other),
        }
    }

    /// Returns true if `name` is an operator or an alias.
    #[must_use]
    pub fn is_operator_name(name: &str) -> bool {
        Self::parse(name).is_some()
    }

    /// Returns true for operators whose value is a boolean flag rather than a
    /// sample of the field (`isnull`, `isprivate`, `isipv4`, ...).
    #[must_use]
    pub const fn takes_flag(self) -> bool {
        matches!(
            self,
            Self::IsNull
                | Self::IsPrivate
                | Self::IsPublic
                | Self::IsIpv4
                | Self::IsIpv6
                | Self::IsLoopback
        )
    }

    /// SQL comparison symbol for `eq`..`lte`.
    #[must_use]
    pub const fn comparison_symbol(self) -> Option<&'static str> {
        match self {
            Self::Eq => Some("="),
            Self::Neq => Some("!="),
            Self::Gt => Some(">"),
            Self::Gte => Some(">="),
            Self::Lt => Some("<"),
            Self::Lte => Some("<="),
            _ => None,
        }
    }
}

impl Serialize for Operator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a strategy in the precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// `isnull` for every family.
    NullCheck,
    /// `daterange` operators.
    DateRange,
    /// `ltree` operators.
    HierarchicalPath,
    /// `macaddr` equality.
    MacAddress,
    /// `inet` operators.
    IpNetwork,
    /// pgvector distances.
    Vector,
    /// Boolean equality.
    Boolean,
    /// Numeric comparisons.
    Numeric,
    /// LIKE/regex matching on text.
    PatternMatching,
    /// `in`/`notin` for scalar families.
    GenericList,
    /// Fallback comparisons.
    GenericComparison,
}

impl StrategyKind {
    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NullCheck => "NullCheck",
            Self::DateRange => "DateRange",
            Self::HierarchicalPath => "HierarchicalPath",
            Self::MacAddress => "MacAddress",
            Self::IpNetwork => "IpNetwork",
            Self::Vector => "Vector",
            Self::Boolean => "Boolean",
            Self::Numeric => "Numeric",
            Self::PatternMatching => "PatternMatching",
            Self::GenericList => "GenericList",
            Self::GenericComparison => "GenericComparison",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs shared by every build call for one field.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Field being filtered.
    pub path: &'a FieldPath,
    /// Family detected for the field.
    pub family: FieldTypeFamily,
    /// JSONB document mode (`false` = typed-column mode).
    pub jsonb: bool,
}

impl<'a> BuildContext<'a> {
    /// Creates a context.
    #[must_use]
    pub const fn new(path: &'a FieldPath, family: FieldTypeFamily, jsonb: bool) -> Self {
        Self {
            path,
            family,
            jsonb,
        }
    }

    /// Field name used in errors.
    #[must_use]
    pub fn field(&self) -> String {
        self.path.dotted()
    }

    /// The parenthesized text path.
    #[must_use]
    pub fn text_path(&self) -> String {
        self.path.text_sql(self.jsonb)
    }

    /// The text path followed by `::cast`, or bare when `cast` is empty.
    #[must_use]
    pub fn cast_path(&self, cast: &str) -> String {
        let text = self.text_path();
        if cast.is_empty() {
            text
        } else {
            format!("{text}::{cast}")
        }
    }

    pub(crate) fn unsupported(&self, operator: Operator) -> CompileError {
        CompileError::UnsupportedOperator {
            field: self.field(),
            operator: operator.as_str().to_string(),
            family: self.family,
        }
    }

    pub(crate) fn mismatch(&self, expected: &str, value: &LiteralValue) -> CompileError {
        CompileError::type_mismatch(self.field(), expected, value.kind())
    }

    pub(crate) fn malformed(&self, value: &LiteralValue, reason: impl Into<String>) -> CompileError {
        CompileError::malformed(self.field(), value.to_string(), reason)
    }
}

/// Build function signature shared by all strategies.
pub type BuildFn = fn(&BuildContext<'_>, Operator, &LiteralValue) -> Result<SqlFragment>;

/// A registered SQL-generation strategy.
#[derive(Clone, Copy)]
pub struct OperatorStrategy {
    /// Position in the precedence table.
    pub kind: StrategyKind,
    /// Operators this strategy can render.
    pub operators: &'static [Operator],
    /// Families this strategy claims.
    pub families: fn(FieldTypeFamily) -> bool,
    /// Renders SQL for one operator.
    pub build_fn: BuildFn,
}

impl OperatorStrategy {
    /// Returns true if this strategy handles `operator` on `family`.
    #[must_use]
    pub fn supports(&self, operator: Operator, family: FieldTypeFamily) -> bool {
        self.operators.contains(&operator) && (self.families)(family)
    }

    /// Renders SQL for one operator.
    pub fn build(
        &self,
        ctx: &BuildContext<'_>,
        operator: Operator,
        value: &LiteralValue,
    ) -> Result<SqlFragment> {
        (self.build_fn)(ctx, operator, value)
    }

    /// Families from [`FieldTypeFamily::ALL`] this strategy claims.
    #[must_use]
    pub fn claimed_families(&self) -> Vec<FieldTypeFamily> {
        FieldTypeFamily::ALL
            .into_iter()
            .filter(|f| (self.families)(*f))
            .collect()
    }
}

impl std::fmt::Debug for OperatorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorStrategy")
            .field("kind", &self.kind)
            .field("operators", &self.operators)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Requires a string value.
pub(crate) fn require_text<'v>(ctx: &BuildContext<'_>, value: &'v LiteralValue) -> Result<&'v str> {
    value.as_str().ok_or_else(|| ctx.mismatch("string", value))
}

/// Requires a non-empty list value.
pub(crate) fn require_list<'v>(
    ctx: &BuildContext<'_>,
    value: &'v LiteralValue,
) -> Result<&'v [LiteralValue]> {
    match value {
        LiteralValue::List(items) if items.is_empty() => {
            Err(CompileError::type_mismatch(ctx.field(), "non-empty list", "empty list"))
        }
        LiteralValue::List(items) => Ok(items),
        other => Err(ctx.mismatch("list", other)),
    }
}

/// Requires a boolean flag, also accepting `"true"`/`"false"`.
pub(crate) fn require_flag(ctx: &BuildContext<'_>, value: &LiteralValue) -> Result<bool> {
    match value {
        LiteralValue::Bool(b) => Ok(*b),
        LiteralValue::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        LiteralValue::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(ctx.mismatch("boolean", other)),
    }
}

/// Requires a string and runs a family validator on it.
pub(crate) fn validated_text(
    ctx: &BuildContext<'_>,
    value: &LiteralValue,
    validate: fn(&str) -> std::result::Result<(), String>,
) -> Result<SqlParam> {
    let s = require_text(ctx, value)?;
    validate(s).map_err(|reason| ctx.malformed(value, reason))?;
    Ok(SqlParam::Text(s.to_string()))
}

/// `(path)::cast OP %s::cast`
pub(crate) fn binary(ctx: &BuildContext<'_>, symbol: &str, param: SqlParam, cast: &str) -> SqlFragment {
    let mut fragment = SqlFragment::sql(format!("{} {symbol} ", ctx.cast_path(cast)));
    fragment.push_cast_param(param, cast);
    fragment
}

/// `(path)::cast IN (%s::cast, ...)`, or `NOT IN` when `negated`.
pub(crate) fn membership(
    ctx: &BuildContext<'_>,
    negated: bool,
    params: Vec<SqlParam>,
    cast: &str,
) -> SqlFragment {
    let keyword = if negated { "NOT IN" } else { "IN" };
    let mut fragment = SqlFragment::sql(format!("{} {keyword} (", ctx.cast_path(cast)));
    for (i, param) in params.into_iter().enumerate() {
        if i > 0 {
            fragment.push_sql(", ");
        }
        fragment.push_cast_param(param, cast);
    }
    fragment.push_sql(")");
    fragment
}

/// `eq/neq/in/notin` for families whose literals are validated strings cast to a
/// dedicated PostgreSQL type (`inet`, `macaddr`, `ltree`, `daterange`).
pub(crate) fn typed_equality(
    ctx: &BuildContext<'_>,
    operator: Operator,
    value: &LiteralValue,
    cast: &str,
    validate: fn(&str) -> std::result::Result<(), String>,
) -> Result<SqlFragment> {
    match operator {
        Operator::Eq | Operator::Neq => {
            let param = validated_text(ctx, value, validate)?;
            let symbol = operator.comparison_symbol().unwrap_or("=");
            Ok(binary(ctx, symbol, param, cast))
        }
        Operator::In | Operator::NotIn => {
            let params = require_list(ctx, value)?
                .iter()
                .map(|item| validated_text(ctx, item, validate))
                .collect::<Result<Vec<_>>>()?;
            Ok(membership(ctx, operator == Operator::NotIn, params, cast))
        }
        other => Err(ctx.unsupported(other)),
    }
}
