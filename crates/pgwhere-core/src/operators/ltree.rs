//! `ltree` hierarchical path operators.

use super::{
    binary, require_list, require_text, typed_equality, validated_text, BuildContext, Operator,
    OperatorStrategy, StrategyKind,
};
use crate::detect::shapes::validate_ltree;
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::SqlFragment;
use crate::value::{LiteralValue, SqlParam};

/// Hierarchical path strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::HierarchicalPath,
    operators: &[
        Operator::Eq,
        Operator::Neq,
        Operator::In,
        Operator::NotIn,
        Operator::AncestorOf,
        Operator::DescendantOf,
        Operator::DepthEq,
        Operator::DepthGt,
        Operator::DepthLt,
        Operator::MatchesLquery,
        Operator::MatchesLtxtquery,
        Operator::MatchesAnyLquery,
    ],
    families: is_ltree,
    build_fn: build,
};

fn is_ltree(family: FieldTypeFamily) -> bool {
    family == FieldTypeFamily::HierarchicalPath
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    match operator {
        Operator::Eq | Operator::Neq | Operator::In | Operator::NotIn => {
            typed_equality(ctx, operator, value, "ltree", validate_ltree)
        }
        Operator::AncestorOf => {
            let param = validated_text(ctx, value, validate_ltree)?;
            Ok(binary(ctx, "@>", param, "ltree"))
        }
        Operator::DescendantOf => {
            let param = validated_text(ctx, value, validate_ltree)?;
            Ok(binary(ctx, "<@", param, "ltree"))
        }
        Operator::DepthEq => depth(ctx, "=", value),
        Operator::DepthGt => depth(ctx, ">", value),
        Operator::DepthLt => depth(ctx, "<", value),
        Operator::MatchesLquery => {
            let param = query_param(ctx, value)?;
            Ok(binary_to(ctx, "~", param, "lquery"))
        }
        Operator::MatchesLtxtquery => {
            let param = query_param(ctx, value)?;
            Ok(binary_to(ctx, "@", param, "ltxtquery"))
        }
        Operator::MatchesAnyLquery => {
            let mut fragment = SqlFragment::sql(format!("{} ? ARRAY[", ctx.cast_path("ltree")));
            for (i, item) in require_list(ctx, value)?.iter().enumerate() {
                if i > 0 {
                    fragment.push_sql(", ");
                }
                fragment.push_cast_param(query_param(ctx, item)?, "lquery");
            }
            fragment.push_sql("]");
            Ok(fragment)
        }
        other => Err(ctx.unsupported(other)),
    }
}

/// `nlevel((path)::ltree) OP %s::integer`
fn depth(ctx: &BuildContext<'_>, symbol: &str, value: &LiteralValue) -> Result<SqlFragment> {
    let levels = match value {
        LiteralValue::Int(i) if *i >= 0 => *i,
        LiteralValue::Int(_) => return Err(ctx.malformed(value, "depth must be non-negative")),
        LiteralValue::BigInt(_) => return Err(ctx.malformed(value, "depth is out of range")),
        other => return Err(ctx.mismatch("non-negative integer", other)),
    };
    let mut fragment = SqlFragment::sql(format!("nlevel({}) {symbol} ", ctx.cast_path("ltree")));
    fragment.push_cast_param(SqlParam::Int(levels), "integer");
    Ok(fragment)
}

/// `(path)::ltree OP %s::<query type>`
fn binary_to(ctx: &BuildContext<'_>, symbol: &str, param: SqlParam, cast: &str) -> SqlFragment {
    let mut fragment = SqlFragment::sql(format!("{} {symbol} ", ctx.cast_path("ltree")));
    fragment.push_cast_param(param, cast);
    fragment
}

/// lquery/ltxtquery syntax is checked by PostgreSQL; only blank queries are rejected here.
fn query_param(ctx: &BuildContext<'_>, value: &LiteralValue) -> Result<SqlParam> {
    let query = require_text(ctx, value)?;
    if query.trim().is_empty() {
        return Err(ctx.malformed(value, "empty query"));
    }
    Ok(SqlParam::Text(query.to_string()))
}
