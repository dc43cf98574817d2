//! Fallback comparisons for text-like families.
//!
//! Uuid, Date and DateTime literals are validated and cast on both sides; plain
//! text compares uncast.

use super::{binary, validated_text, BuildContext, Operator, OperatorStrategy, StrategyKind};
use crate::detect::shapes::{validate_date, validate_datetime, validate_uuid};
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::SqlFragment;
use crate::value::{LiteralValue, SqlParam};

/// Generic comparison strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::GenericComparison,
    operators: &[
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
    ],
    families: is_text_like,
    build_fn: build,
};

fn is_text_like(family: FieldTypeFamily) -> bool {
    matches!(
        family,
        FieldTypeFamily::Text
            | FieldTypeFamily::Uuid
            | FieldTypeFamily::Date
            | FieldTypeFamily::DateTime
            | FieldTypeFamily::Unknown
    )
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    let Some(symbol) = operator.comparison_symbol() else {
        return Err(ctx.unsupported(operator));
    };
    let param = family_param(ctx, value)?;
    Ok(binary(ctx, symbol, param, ctx.family.sql_cast()))
}

/// Binds a literal for the context's family, validating typed families.
pub(crate) fn family_param(ctx: &BuildContext<'_>, value: &LiteralValue) -> Result<SqlParam> {
    match ctx.family {
        FieldTypeFamily::Uuid => validated_text(ctx, value, validate_uuid),
        FieldTypeFamily::Date => validated_text(ctx, value, validate_date),
        FieldTypeFamily::DateTime => validated_text(ctx, value, validate_datetime),
        _ => scalar_text(ctx, value),
    }
}

/// Binds any scalar as text; text columns compare against text parameters.
pub(crate) fn scalar_text(ctx: &BuildContext<'_>, value: &LiteralValue) -> Result<SqlParam> {
    match value {
        LiteralValue::Text(s) => Ok(SqlParam::Text(s.clone())),
        LiteralValue::Int(i) => Ok(SqlParam::Text(i.to_string())),
        LiteralValue::BigInt(digits) => Ok(SqlParam::Text(digits.clone())),
        LiteralValue::Float(f) => Ok(SqlParam::Text(f.to_string())),
        LiteralValue::Bool(b) => Ok(SqlParam::Text(b.to_string())),
        other => Err(ctx.mismatch("scalar", other)),
    }
}
