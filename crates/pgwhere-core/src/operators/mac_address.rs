//! `macaddr` equality and membership.

use super::{typed_equality, BuildContext, Operator, OperatorStrategy, StrategyKind};
use crate::detect::shapes::validate_macaddr;
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::SqlFragment;
use crate::value::LiteralValue;

/// MAC address strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::MacAddress,
    operators: &[Operator::Eq, Operator::Neq, Operator::In, Operator::NotIn],
    families: is_mac,
    build_fn: build,
};

fn is_mac(family: FieldTypeFamily) -> bool {
    family == FieldTypeFamily::MacAddress
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    typed_equality(ctx, operator, value, "macaddr", validate_macaddr)
}
