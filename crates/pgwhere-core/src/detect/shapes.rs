//! Value-shape sniffing and literal validation.
//!
//! The `sniff_*` checks are strict and only used for detection. The
//! `validate_*` functions accept every spelling PostgreSQL accepts and return a
//! reason on failure; strategies turn that reason into a `MalformedLiteral`.

use std::net::IpAddr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use super::FieldTypeFamily;
use crate::value::LiteralValue;

/// Infers a family from a sample value.
#[must_use]
pub fn family_from_value(value: &LiteralValue) -> FieldTypeFamily {
    match value {
        LiteralValue::Text(s) => family_from_text(s),
        LiteralValue::List(items) => match items.first() {
            None => FieldTypeFamily::Unknown,
            Some(_) if items.iter().all(is_finite_number) => FieldTypeFamily::Vector,
            Some(first) => family_from_value(first),
        },
        LiteralValue::Bool(_) => FieldTypeFamily::Boolean,
        LiteralValue::Int(_) | LiteralValue::BigInt(_) | LiteralValue::Float(_) => {
            FieldTypeFamily::Numeric
        }
        LiteralValue::Null | LiteralValue::Json(_) => FieldTypeFamily::Unknown,
    }
}

fn family_from_text(s: &str) -> FieldTypeFamily {
    if validate_inet(s).is_ok() {
        FieldTypeFamily::IpNetwork
    } else if sniff_mac(s) {
        FieldTypeFamily::MacAddress
    } else if sniff_daterange(s) {
        FieldTypeFamily::DateRange
    } else if sniff_uuid(s) {
        FieldTypeFamily::Uuid
    } else {
        FieldTypeFamily::Text
    }
}

fn is_finite_number(value: &LiteralValue) -> bool {
    match value {
        LiteralValue::Int(_) | LiteralValue::BigInt(_) => true,
        LiteralValue::Float(f) => f.is_finite(),
        _ => false,
    }
}

/// Six two-digit hex groups separated consistently by `:` or `-`.
#[must_use]
pub fn sniff_mac(s: &str) -> bool {
    let Some(sep) = s.chars().find(|c| *c == ':' || *c == '-') else {
        return false;
    };
    let groups: Vec<&str> = s.split(sep).collect();
    groups.len() == 6
        && groups
            .iter()
            .all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Bracketed pair of two ISO dates.
#[must_use]
pub fn sniff_daterange(s: &str) -> bool {
    match split_range(s) {
        Some((Some(lower), Some(upper))) => parse_date(lower).is_ok() && parse_date(upper).is_ok(),
        _ => false,
    }
}

/// Canonical hyphenated UUID.
#[must_use]
pub fn sniff_uuid(s: &str) -> bool {
    s.len() == 36 && Uuid::try_parse(s).is_ok()
}

/// IPv4/IPv6 address with optional `/prefix`.
pub fn validate_inet(s: &str) -> Result<(), String> {
    let (addr, prefix) = match s.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (s, None),
    };

    let ip: IpAddr = addr
        .parse()
        .map_err(|_| "not an IPv4 or IPv6 address".to_string())?;

    if let Some(prefix) = prefix {
        let bits: u8 = prefix
            .parse()
            .map_err(|_| format!("invalid prefix length '{prefix}'"))?;
        let max = if ip.is_ipv4() { 32 } else { 128 };
        if bits > max {
            return Err(format!("prefix length {bits} exceeds {max}"));
        }
    }
    Ok(())
}

/// MAC address in any format PostgreSQL's `macaddr` accepts.
///
/// Accepted group layouts: `6x2` (`:` or `-`), `2x6` (`:` or `-`), `3x4`
/// (`.` or `-`) and 12 bare hex digits.
pub fn validate_macaddr(s: &str) -> Result<(), String> {
    let sep = s.chars().find(|c| matches!(c, ':' | '-' | '.'));
    let groups: Vec<&str> = match sep {
        Some(sep) => s.split(sep).collect(),
        None => vec![s],
    };

    if !groups.iter().all(|g| g.chars().all(|c| c.is_ascii_hexdigit())) {
        return Err("contains non-hex characters".to_string());
    }

    let layout_ok = match (sep, groups.len()) {
        (None, 1) => true,
        (Some(':' | '-'), 6) => groups.iter().all(|g| g.len() == 2),
        (Some(':' | '-'), 2) => groups.iter().all(|g| g.len() == 6),
        (Some('.' | '-'), 3) => groups.iter().all(|g| g.len() == 4),
        _ => false,
    };

    let digits: usize = groups.iter().map(|g| g.len()).sum();
    if layout_ok && digits == 12 {
        Ok(())
    } else {
        Err("expected 6 hex octets".to_string())
    }
}

/// Dot-delimited labels of `[A-Za-z0-9_-]`.
pub fn validate_ltree(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("empty path".to_string());
    }
    for label in s.split('.') {
        if label.is_empty() {
            return Err("empty label".to_string());
        }
        if let Some(c) = label
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(format!("invalid character '{c}' in label '{label}'"));
        }
    }
    Ok(())
}

/// Range literal `[start,end)` with optional bounds, or `empty`.
pub fn validate_daterange(s: &str) -> Result<(), String> {
    if s.trim().eq_ignore_ascii_case("empty") {
        return Ok(());
    }

    let (lower, upper) =
        split_range(s).ok_or_else(|| "expected '[start,end)' range syntax".to_string())?;
    let lower = lower.map(parse_date).transpose()?;
    let upper = upper.map(parse_date).transpose()?;

    if let (Some(lower), Some(upper)) = (lower, upper) {
        if lower > upper {
            return Err(format!("lower bound {lower} is after upper bound {upper}"));
        }
    }
    Ok(())
}

/// Hyphenated or simple UUID.
pub fn validate_uuid(s: &str) -> Result<(), String> {
    Uuid::try_parse(s).map(|_| ()).map_err(|e| e.to_string())
}

/// ISO calendar date.
pub fn validate_date(s: &str) -> Result<(), String> {
    parse_date(s).map(|_| ())
}

/// RFC 3339 timestamp, ISO date-time without zone, or a bare ISO date.
pub fn validate_datetime(s: &str) -> Result<(), String> {
    let ok = DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        || parse_date(s).is_ok();
    if ok {
        Ok(())
    } else {
        Err("expected an ISO 8601 date-time".to_string())
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {e}", s.trim()))
}

/// Splits `[a,b)` into its optional bounds.
fn split_range(s: &str) -> Option<(Option<&str>, Option<&str>)> {
    let s = s.trim();
    let inner = s
        .strip_prefix(['[', '('])
        .and_then(|rest| rest.strip_suffix([']', ')']))?;
    let (lower, upper) = inner.split_once(',')?;
    Some((range_bound(lower), range_bound(upper)))
}

fn range_bound(b: &str) -> Option<&str> {
    let b = b.trim();
    (!b.is_empty()).then_some(b)
}
