//! `inet` operators for IP addresses and CIDR networks.

use super::{
    binary, require_flag, typed_equality, validated_text, BuildContext, Operator,
    OperatorStrategy, StrategyKind,
};
use crate::detect::shapes::validate_inet;
use crate::detect::FieldTypeFamily;
use crate::error::Result;
use crate::sql::{quote_literal, SqlFragment};
use crate::value::{LiteralValue, SqlParam};

/// RFC 1918, link-local and IPv6 unique-local/link-local ranges.
pub const PRIVATE_RANGES: &[&str] = &[
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "169.254.0.0/16",
    "fc00::/7",
    "fe80::/10",
];

const LOOPBACK_RANGES: &[&str] = &["127.0.0.0/8", "::1/128"];

/// IP network strategy.
pub const STRATEGY: OperatorStrategy = OperatorStrategy {
    kind: StrategyKind::IpNetwork,
    operators: &[
        Operator::Eq,
        Operator::Neq,
        Operator::In,
        Operator::NotIn,
        Operator::InSubnet,
        Operator::ContainsSubnet,
        Operator::InRange,
        Operator::IsPrivate,
        Operator::IsPublic,
        Operator::IsIpv4,
        Operator::IsIpv6,
        Operator::IsLoopback,
        Operator::Overlaps,
        Operator::StrictLeft,
        Operator::StrictRight,
    ],
    families: is_network,
    build_fn: build,
};

fn is_network(family: FieldTypeFamily) -> bool {
    family == FieldTypeFamily::IpNetwork
}

fn build(ctx: &BuildContext<'_>, operator: Operator, value: &LiteralValue) -> Result<SqlFragment> {
    let symbol = match operator {
        Operator::Eq | Operator::Neq | Operator::In | Operator::NotIn => {
            return typed_equality(ctx, operator, value, "inet", validate_inet);
        }
        Operator::IsPrivate => {
            return Ok(within_ranges(ctx, PRIVATE_RANGES, require_flag(ctx, value)?));
        }
        Operator::IsPublic => {
            return Ok(within_ranges(ctx, PRIVATE_RANGES, !require_flag(ctx, value)?));
        }
        Operator::IsLoopback => {
            return Ok(within_ranges(ctx, LOOPBACK_RANGES, require_flag(ctx, value)?));
        }
        Operator::InRange => return address_range(ctx, value),
        Operator::IsIpv4 => return Ok(family_check(ctx, 4, require_flag(ctx, value)?)),
        Operator::IsIpv6 => return Ok(family_check(ctx, 6, require_flag(ctx, value)?)),
        Operator::InSubnet => "<<=",
        Operator::ContainsSubnet => ">>=",
        Operator::Overlaps => "&&",
        Operator::StrictLeft => "<",
        Operator::StrictRight => ">",
        other => return Err(ctx.unsupported(other)),
    };

    let param = validated_text(ctx, value, validate_inet)?;
    Ok(binary(ctx, symbol, param, "inet"))
}

/// `((path)::inet >= %s::inet AND (path)::inet <= %s::inet)` for `{"from": ip, "to": ip}`.
fn address_range(ctx: &BuildContext<'_>, value: &LiteralValue) -> Result<SqlFragment> {
    let LiteralValue::Json(serde_json::Value::Object(bounds)) = value else {
        return Err(ctx.mismatch("object with 'from' and 'to'", value));
    };
    if let Some(extra) = bounds.keys().find(|key| !matches!(key.as_str(), "from" | "to")) {
        return Err(ctx.malformed(value, format!("unexpected range key '{extra}'")));
    }

    let bound = |key: &str| -> Result<SqlParam> {
        let raw = bounds
            .get(key)
            .ok_or_else(|| ctx.malformed(value, format!("missing '{key}' bound")))?;
        validated_text(ctx, &LiteralValue::from(raw), validate_inet)
    };
    let from = bound("from")?;
    let to = bound("to")?;

    let path = ctx.cast_path("inet");
    let mut fragment = SqlFragment::sql(format!("({path} >= "));
    fragment.push_cast_param(from, "inet");
    fragment.push_sql(format!(" AND {path} <= "));
    fragment.push_cast_param(to, "inet");
    fragment.push_sql(")");
    Ok(fragment)
}

/// `((path)::inet <<= 'r1'::inet OR ...)`, wrapped in `NOT` when `inside` is false.
fn within_ranges(ctx: &BuildContext<'_>, ranges: &[&str], inside: bool) -> SqlFragment {
    let path = ctx.cast_path("inet");
    let terms: Vec<String> = ranges
        .iter()
        .map(|range| format!("{path} <<= {}::inet", quote_literal(range)))
        .collect();
    let any = format!("({})", terms.join(" OR "));

    if inside {
        SqlFragment::sql(any)
    } else {
        SqlFragment::sql(format!("NOT {any}"))
    }
}

fn family_check(ctx: &BuildContext<'_>, version: u8, expected: bool) -> SqlFragment {
    let symbol = if expected { "=" } else { "!=" };
    SqlFragment::sql(format!("family({}) {symbol} {version}", ctx.cast_path("inet")))
}
