//! `daterange` operators.

use super::{
    binary, typed_equality, validated_text, BuildContext, Operator, OperatorStrategy,
    StrategyKind,
};
use crate::detect::shapes::{validate_date, validate_daterange};
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::SqlFragment;
use crate::value::LiteralValue;

/// Date range strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::DateRange,
    operators: &[
        Operator::Eq,
        Operator::Neq,
        Operator::In,
        Operator::NotIn,
        Operator::ContainsDate,
        Operator::Overlaps,
        Operator::Adjacent,
        Operator::StrictlyLeft,
        Operator::StrictlyRight,
        Operator::NotLeft,
        Operator::NotRight,
    ],
    families: is_date_range,
    build_fn: build,
};

fn is_date_range(family: FieldTypeFamily) -> bool {
    family == FieldTypeFamily::DateRange
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    let symbol = match operator {
        Operator::Eq | Operator::Neq | Operator::In | Operator::NotIn => {
            return typed_equality(ctx, operator, value, "daterange", validate_daterange);
        }
        Operator::ContainsDate => {
            let param = validated_text(ctx, value, validate_date)?;
            let mut fragment = SqlFragment::sql(format!("{} @> ", ctx.cast_path("daterange")));
            fragment.push_cast_param(param, "date");
            return Ok(fragment);
        }
        Operator::Overlaps => "&&",
        Operator::Adjacent => "-|-",
        Operator::StrictlyLeft => "<<",
        Operator::StrictlyRight => ">>",
        // "does not extend to the left of"
        Operator::NotLeft => "&>",
        // "does not extend to the right of"
        Operator::NotRight => "&<",
        other => return Err(ctx.unsupported(other)),
    };

    let param = validated_text(ctx, value, validate_daterange)?;
    Ok(binary(ctx, symbol, param, "daterange"))
}
