//! pgvector distance expressions.
//!
//! These render scalar expressions such as `((path)::vector <=> %s::vector)`,
//! not predicates. Callers compare them against a threshold or order by them.

use super::{BuildContext, Operator, OperatorStrategy, StrategyKind};
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::SqlFragment;
use crate::value::{LiteralValue, SqlParam};

/// Vector distance strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::Vector,
    operators: &[
        Operator::CosineDistance,
        Operator::L2Distance,
        Operator::InnerProduct,
        Operator::L1Distance,
        Operator::HammingDistance,
        Operator::JaccardDistance,
    ],
    families: is_vector,
    build_fn: build,
};

fn is_vector(family: FieldTypeFamily) -> bool {
    family == FieldTypeFamily::Vector
}

/// pgvector operator for a distance operator.
#[must_use]
pub const fn distance_symbol(operator: Operator) -> Option<&'static str> {
    match operator {
        Operator::CosineDistance => Some("<=>"),
        Operator::L2Distance => Some("<->"),
        Operator::InnerProduct => Some("<#>"),
        Operator::L1Distance => Some("<+>"),
        Operator::HammingDistance => Some("<~>"),
        Operator::JaccardDistance => Some("<%>"),
        _ => None,
    }
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    let Some(symbol) = distance_symbol(operator) else {
        return Err(ctx.unsupported(operator));
    };

    let (literal, cast) = match operator {
        Operator::HammingDistance | Operator::JaccardDistance => {
            let bits = bit_literal(ctx, value)?;
            let cast = format!("bit({})", bits.len());
            (bits, cast)
        }
        _ => (dense_literal(ctx, value)?, "vector".to_string()),
    };

    let mut fragment = SqlFragment::sql(format!("({} {symbol} ", ctx.cast_path(&cast)));
    fragment.push_cast_param(SqlParam::Text(literal), &cast);
    fragment.push_sql(")");
    Ok(fragment.into_scalar())
}

/// `[x,y,...]` text for a non-empty list of finite numbers.
fn dense_literal(ctx: &BuildContext<'_>, value: &LiteralValue) -> Result<String> {
    let items = match value {
        LiteralValue::List(items) if !items.is_empty() => items,
        LiteralValue::List(_) => return Err(ctx.malformed(value, "empty vector")),
        other => return Err(ctx.mismatch("list of numbers", other)),
    };

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        match item {
            LiteralValue::Int(i) => parts.push(i.to_string()),
            LiteralValue::BigInt(digits) => parts.push(digits.clone()),
            LiteralValue::Float(f) if f.is_finite() => parts.push(f.to_string()),
            LiteralValue::Float(_) => {
                return Err(ctx.malformed(value, "vector components must be finite"));
            }
            _ => return Err(ctx.malformed(value, "vector components must be numbers")),
        }
    }
    Ok(format!("[{}]", parts.join(",")))
}

/// `0/1` text for a bit string given as text or a list of 0/1 integers.
fn bit_literal(ctx: &BuildContext<'_>, value: &LiteralValue) -> Result<String> {
    let bits: String = match value {
        LiteralValue::Text(s) => s.clone(),
        LiteralValue::List(items) => items
            .iter()
            .map(|item| match item {
                LiteralValue::Int(0) => Ok('0'),
                LiteralValue::Int(1) => Ok('1'),
                _ => Err(ctx.malformed(value, "bit vector elements must be 0 or 1")),
            })
            .collect::<Result<String>>()?,
        other => return Err(ctx.mismatch("bit string or list of 0/1", other)),
    };

    if bits.is_empty() {
        return Err(ctx.malformed(value, "empty bit vector"));
    }
    if !bits.chars().all(|c| c == '0' || c == '1') {
        return Err(ctx.malformed(value, "bit string may only contain 0 and 1"));
    }
    Ok(bits)
}
