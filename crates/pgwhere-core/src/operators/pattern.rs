//! LIKE and regular-expression matching on text.

use super::{require_text, BuildContext, Operator, OperatorStrategy, StrategyKind};
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::{escape_like, SqlFragment};
use crate::value::{LiteralValue, SqlParam};

/// Pattern matching strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::PatternMatching,
    operators: &[
        Operator::Contains,
        Operator::IContains,
        Operator::StartsWith,
        Operator::IStartsWith,
        Operator::EndsWith,
        Operator::IEndsWith,
        Operator::Matches,
        Operator::IMatches,
        Operator::NotMatches,
        Operator::Like,
        Operator::ILike,
    ],
    families: is_text,
    build_fn: build,
};

fn is_text(family: FieldTypeFamily) -> bool {
    matches!(family, FieldTypeFamily::Text | FieldTypeFamily::Unknown)
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    let raw = require_text(ctx, value)?;

    let (keyword, pattern) = match operator {
        Operator::Contains => ("LIKE", format!("%{}%", escape_like(raw))),
        Operator::IContains => ("ILIKE", format!("%{}%", escape_like(raw))),
        Operator::StartsWith => ("LIKE", format!("{}%", escape_like(raw))),
        Operator::IStartsWith => ("ILIKE", format!("{}%", escape_like(raw))),
        Operator::EndsWith => ("LIKE", format!("%{}", escape_like(raw))),
        Operator::IEndsWith => ("ILIKE", format!("%{}", escape_like(raw))),
        Operator::Matches => ("~", raw.to_string()),
        Operator::IMatches => ("~*", raw.to_string()),
        Operator::NotMatches => ("!~", raw.to_string()),
        Operator::Like => ("LIKE", raw.to_string()),
        Operator::ILike => ("ILIKE", raw.to_string()),
        other => return Err(ctx.unsupported(other)),
    };

    let mut fragment = SqlFragment::sql(format!("{} {keyword} ", ctx.text_path()));
    fragment.push_param(SqlParam::Text(pattern));
    Ok(fragment)
}
