//! `isnull` for every family.

use super::{BuildContext, Operator, OperatorStrategy, StrategyKind};
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::SqlFragment;
use crate::value::LiteralValue;

/// Null-check strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::NullCheck,
    operators: &[Operator::IsNull],
    families: any_family,
    build_fn: build,
};

fn any_family(_: FieldTypeFamily) -> bool {
    true
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    if operator != Operator::IsNull {
        return Err(ctx.unsupported(operator));
    }
    match value {
        LiteralValue::Bool(true) => Ok(SqlFragment::sql(format!("{} IS NULL", ctx.text_path()))),
        LiteralValue::Bool(false) => Ok(SqlFragment::sql(format!(
            "{} IS NOT NULL",
            ctx.text_path()
        ))),
        other => Err(ctx.mismatch("boolean", other)),
    }
}
