//! Field-name vocabulary.

use super::FieldTypeFamily;

const DATE_TOKENS: &[&str] = &["date", "dates", "day", "days"];

/// Splits `camelCase`, `PascalCase` and `snake_case` names into lowercase tokens.
///
/// Acronym runs stay together: `serverIPAddress` gives `server ip address`.
#[must_use]
pub fn tokenize(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                tokens.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Matches a field name against the known vocabularies.
///
/// MAC is checked before IP so `mac_address` never reads as an IP address.
#[must_use]
pub fn family_from_name(name: &str) -> Option<FieldTypeFamily> {
    let tokens = tokenize(name);
    let (last, init) = tokens.split_last()?;
    let last = last.as_str();
    let prev = init.last().map(String::as_str);

    if last == "mac" || last == "macaddr" || (last == "address" && prev == Some("mac")) {
        return Some(FieldTypeFamily::MacAddress);
    }

    if matches!(last, "ip" | "ipv4" | "ipv6" | "inet" | "cidr" | "subnet")
        || (last == "address" && prev == Some("ip"))
    {
        return Some(FieldTypeFamily::IpNetwork);
    }

    if matches!(last, "path" | "hierarchy" | "ltree") {
        return Some(FieldTypeFamily::HierarchicalPath);
    }

    if matches!(last, "period" | "validity" | "daterange")
        || (last == "range" && init.iter().any(|t| DATE_TOKENS.contains(&t.as_str())))
    {
        return Some(FieldTypeFamily::DateRange);
    }

    if matches!(last, "embedding" | "embeddings" | "vector") {
        return Some(FieldTypeFamily::Vector);
    }

    if (last == "at" && !init.is_empty()) || matches!(last, "timestamp" | "datetime") {
        return Some(FieldTypeFamily::DateTime);
    }

    if matches!(last, "date" | "dob" | "birthday" | "birthdate") {
        return Some(FieldTypeFamily::Date);
    }

    None
}
