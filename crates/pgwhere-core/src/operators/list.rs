//! `in` / `notin` for scalar families.
//!
//! Every element is cast by the apparent family of the first element. Mixing
//! booleans, numbers and strings in one list is a type mismatch.

use super::comparison::family_param;
use super::numeric::numeric_param;
use super::{
    membership, require_flag, require_list, BuildContext, Operator, OperatorStrategy, StrategyKind,
};
use crate::detect::FieldTypeFamily;
use crate::error::{CompileError, Result};
use crate::sql::SqlFragment;
use crate::value::{LiteralValue, SqlParam};

/// Generic list strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::GenericList,
    operators: &[Operator::In, Operator::NotIn],
    families: is_scalar,
    build_fn: build,
};

fn is_scalar(family: FieldTypeFamily) -> bool {
    matches!(
        family,
        FieldTypeFamily::Boolean
            | FieldTypeFamily::Numeric
            | FieldTypeFamily::Text
            | FieldTypeFamily::Uuid
            | FieldTypeFamily::Date
            | FieldTypeFamily::DateTime
            | FieldTypeFamily::Unknown
    )
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Bool,
    Number,
    Text,
}

impl ElementKind {
    fn of(value: &LiteralValue) -> Option<Self> {
        match value {
            LiteralValue::Bool(_) => Some(Self::Bool),
            LiteralValue::Int(_) | LiteralValue::BigInt(_) | LiteralValue::Float(_) => {
                Some(Self::Number)
            }
            LiteralValue::Text(_) => Some(Self::Text),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::Text => "string",
        }
    }
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    let negated = match operator {
        Operator::In => false,
        Operator::NotIn => true,
        other => return Err(ctx.unsupported(other)),
    };

    let items = require_list(ctx, value)?;
    let first = ElementKind::of(&items[0]).ok_or_else(|| ctx.mismatch("list of scalars", &items[0]))?;

    let cast = match first {
        ElementKind::Bool => "boolean",
        ElementKind::Number => "numeric",
        ElementKind::Text => ctx.family.sql_cast(),
    };

    let mut params = Vec::with_capacity(items.len());
    for item in items {
        if ElementKind::of(item) != Some(first) {
            return Err(CompileError::type_mismatch(
                ctx.field(),
                format!("homogeneous list of {}", first.name()),
                format!("list containing {}", item.kind()),
            ));
        }
        let param = match (first, item) {
            (ElementKind::Bool, LiteralValue::Bool(b)) => SqlParam::Bool(*b),
            (ElementKind::Number, _) => numeric_param(ctx, item)?,
            (_, text) if ctx.family == FieldTypeFamily::Numeric => numeric_param(ctx, text)?,
            (_, text) if ctx.family == FieldTypeFamily::Boolean => {
                SqlParam::Bool(require_flag(ctx, text)?)
            }
            (_, text) => family_param(ctx, text)?,
        };
        params.push(param);
    }

    Ok(membership(ctx, negated, params, cast))
}
