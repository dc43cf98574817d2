//! Numeric comparisons.
//!
//! Integers and floats bind as numbers. Numeric strings and integers beyond
//! `i64` bind as text so the `::numeric` cast keeps every digit.

use super::{binary, BuildContext, Operator, OperatorStrategy, StrategyKind};
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::SqlFragment;
use crate::value::{LiteralValue, SqlParam};

/// Numeric strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::Numeric,
    operators: &[
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
    ],
    families: is_numeric,
    build_fn: build,
};

fn is_numeric(family: FieldTypeFamily) -> bool {
    family == FieldTypeFamily::Numeric
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    let Some(symbol) = operator.comparison_symbol() else {
        return Err(ctx.unsupported(operator));
    };
    let param = numeric_param(ctx, value)?;
    Ok(binary(ctx, symbol, param, "numeric"))
}

/// Converts a number or numeric string into a bound parameter.
pub(crate) fn numeric_param(ctx: &BuildContext<'_>, value: &LiteralValue) -> Result<SqlParam> {
    match value {
        LiteralValue::Int(i) => Ok(SqlParam::Int(*i)),
        LiteralValue::BigInt(digits) => Ok(SqlParam::Text(digits.clone())),
        LiteralValue::Float(f) if f.is_finite() => Ok(SqlParam::Float(*f)),
        LiteralValue::Float(_) => Err(ctx.malformed(value, "number is not finite")),
        LiteralValue::Text(s) if is_numeric_text(s) => Ok(SqlParam::Text(s.trim().to_string())),
        LiteralValue::Text(_) => Err(ctx.malformed(value, "not a numeric string")),
        other => Err(ctx.mismatch("number", other)),
    }
}

fn is_numeric_text(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && s.parse::<f64>().is_ok()
}
