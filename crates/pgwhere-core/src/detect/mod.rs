//! Field type detection.
//!
//! Every field condition is assigned exactly one [`FieldTypeFamily`] before any
//! strategy is resolved. Resolution order:
//!
//! 1. a static [`TypeHint`] wins outright
//! 2. field-name vocabulary (see [`names`])
//! 3. the family the operators imply, when the builder knows one
//! 4. value-shape sniffing (see [`shapes`])
//! 5. [`FieldTypeFamily::Unknown`]

pub mod names;
pub mod shapes;

use serde::{Deserialize, Serialize};

use crate::value::LiteralValue;

/// Logical type family of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTypeFamily {
    /// `true`/`false`.
    Boolean,
    /// Integers and decimals.
    Numeric,
    /// Plain strings.
    Text,
    /// Hyphenated UUIDs.
    Uuid,
    /// Timestamps with or without zone.
    DateTime,
    /// Calendar dates.
    Date,
    /// IPv4/IPv6 addresses and CIDR networks.
    IpNetwork,
    /// 48-bit hardware addresses.
    MacAddress,
    /// `ltree` label paths.
    HierarchicalPath,
    /// `daterange` intervals.
    DateRange,
    /// pgvector embeddings.
    Vector,
    /// Nothing conclusive; handled as text.
    Unknown,
}

impl FieldTypeFamily {
    /// All families, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Boolean,
        Self::Numeric,
        Self::Text,
        Self::Uuid,
        Self::DateTime,
        Self::Date,
        Self::IpNetwork,
        Self::MacAddress,
        Self::HierarchicalPath,
        Self::DateRange,
        Self::Vector,
        Self::Unknown,
    ];

    /// Snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Uuid => "uuid",
            Self::DateTime => "date_time",
            Self::Date => "date",
            Self::IpNetwork => "ip_network",
            Self::MacAddress => "mac_address",
            Self::HierarchicalPath => "hierarchical_path",
            Self::DateRange => "date_range",
            Self::Vector => "vector",
            Self::Unknown => "unknown",
        }
    }

    /// PostgreSQL cast applied to both sides of a comparison, empty for text.
    #[must_use]
    pub const fn sql_cast(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::Uuid => "uuid",
            Self::DateTime => "timestamptz",
            Self::Date => "date",
            Self::IpNetwork => "inet",
            Self::MacAddress => "macaddr",
            Self::HierarchicalPath => "ltree",
            Self::DateRange => "daterange",
            Self::Vector => "vector",
            Self::Text | Self::Unknown => "",
        }
    }
}

impl std::fmt::Display for FieldTypeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldTypeFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == normalized)
            .ok_or_else(|| format!("unknown type family '{s}'"))
    }
}

/// Declared scalar type for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeHint {
    /// Boolean.
    #[serde(alias = "bool")]
    Boolean,
    /// Integer.
    #[serde(alias = "integer")]
    Int,
    /// Floating point.
    Float,
    /// Arbitrary precision decimal.
    Decimal,
    /// String.
    #[serde(alias = "text")]
    String,
    /// UUID.
    Uuid,
    /// Timestamp.
    #[serde(alias = "datetime", alias = "timestamp")]
    DateTime,
    /// Calendar date.
    Date,
    /// IP address or network.
    #[serde(alias = "ip", alias = "inet")]
    IpAddress,
    /// CIDR network.
    Cidr,
    /// MAC address.
    #[serde(alias = "mac", alias = "macaddr")]
    MacAddress,
    /// Label path.
    Ltree,
    /// Date range.
    #[serde(alias = "daterange")]
    DateRange,
    /// Embedding.
    Vector,
    /// Opaque JSON.
    Json,
}

impl TypeHint {
    /// Family the hint maps onto.
    #[must_use]
    pub const fn family(self) -> FieldTypeFamily {
        match self {
            Self::Boolean => FieldTypeFamily::Boolean,
            Self::Int | Self::Float | Self::Decimal => FieldTypeFamily::Numeric,
            Self::String => FieldTypeFamily::Text,
            Self::Uuid => FieldTypeFamily::Uuid,
            Self::DateTime => FieldTypeFamily::DateTime,
            Self::Date => FieldTypeFamily::Date,
            Self::IpAddress | Self::Cidr => FieldTypeFamily::IpNetwork,
            Self::MacAddress => FieldTypeFamily::MacAddress,
            Self::Ltree => FieldTypeFamily::HierarchicalPath,
            Self::DateRange => FieldTypeFamily::DateRange,
            Self::Vector => FieldTypeFamily::Vector,
            Self::Json => FieldTypeFamily::Unknown,
        }
    }
}

impl std::str::FromStr for TypeHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let quoted = serde_json::Value::String(s.trim().to_ascii_lowercase());
        serde_json::from_value(quoted).map_err(|_| {
            format!(
                "unknown type hint '{s}', expected one of: boolean, int, float, decimal, \
                 string, uuid, date_time, date, ip_address, cidr, mac_address, ltree, \
                 date_range, vector, json"
            )
        })
    }
}

/// Detects the type family of a field.
///
/// `field_name` may be dotted; only the leaf key is matched against the name
/// vocabulary. `sample` is a representative non-null operator value.
#[must_use]
pub fn detect(
    field_name: &str,
    sample: Option<&LiteralValue>,
    hint: Option<TypeHint>,
) -> FieldTypeFamily {
    detect_with_implied(field_name, sample, hint, None)
}

/// [`detect`] with an extra step between the name vocabulary and value sniffing.
///
/// `implied` is the family the field's operators can only mean, so
/// `{"fingerprint": {"hamming_distance": "1011"}}` resolves to Vector instead
/// of sniffing the bit string as text. A hint or a conclusive name still wins.
#[must_use]
pub fn detect_with_implied(
    field_name: &str,
    sample: Option<&LiteralValue>,
    hint: Option<TypeHint>,
    implied: Option<FieldTypeFamily>,
) -> FieldTypeFamily {
    if let Some(hint) = hint {
        return hint.family();
    }

    let leaf = field_name.rsplit('.').next().unwrap_or(field_name);
    if let Some(family) = names::family_from_name(leaf) {
        return family;
    }
    if let Some(family) = implied {
        return family;
    }

    sample.map_or(FieldTypeFamily::Unknown, shapes::family_from_value)
}

/// Looks up a hint by dotted path, then by leaf name.
#[must_use]
pub fn lookup_hint<S: std::hash::BuildHasher>(
    hints: &indexmap::IndexMap<String, TypeHint, S>,
    dotted: &str,
) -> Option<TypeHint> {
    let leaf = dotted.rsplit('.').next().unwrap_or(dotted);
    hints.get(dotted).or_else(|| hints.get(leaf)).copied()
}
