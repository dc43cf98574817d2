//! Boolean equality.

use super::{binary, require_flag, BuildContext, Operator, OperatorStrategy, StrategyKind};
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::SqlFragment;
use crate::value::{LiteralValue, SqlParam};

/// Boolean strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::Boolean,
    operators: &[Operator::Eq, Operator::Neq],
    families: is_boolean,
    build_fn: build,
};

fn is_boolean(family: FieldTypeFamily) -> bool {
    family == FieldTypeFamily::Boolean
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    let symbol = match operator {
        Operator::Eq | Operator::Neq => operator.comparison_symbol().unwrap_or("="),
        other => return Err(ctx.unsupported(other)),
    };
    let flag = require_flag(ctx, value)?;
    Ok(binary(ctx, symbol, SqlParam::Bool(flag), "boolean"))
}
