//! Tests for `error` module

use super::detect::FieldTypeFamily;
use super::error::*;

fn all_variants() -> Vec<CompileError> {
    vec![
        CompileError::UnsupportedOperator {
            field: "mac".into(),
            operator: "contains".into(),
            family: FieldTypeFamily::MacAddress,
        },
        CompileError::type_mismatch("tags", "list", "string"),
        CompileError::malformed("ip", "\"300.1.1.1\"", "invalid IPv4 address"),
        CompileError::EmptyGroup {
            path: "AND[1].OR".into(),
        },
        CompileError::TooComplex {
            what: "depth",
            limit: 4,
            actual: 9,
        },
        CompileError::InvalidFieldPath {
            path: "a..b".into(),
            reason: "empty key".into(),
        },
        CompileError::Json(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
    ]
}

// -------------------------------------------------------------------------
// Error code tests
// -------------------------------------------------------------------------

#[test]
fn test_error_codes_are_unique() {
    // Arrange
    let errors = all_variants();

    // Act
    let codes: Vec<&str> = errors.iter().map(CompileError::code).collect();

    // Assert
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");

    for code in &codes {
        assert!(code.starts_with("PGW-"), "Code {code} should start with PGW-");
    }
}

#[test]
fn test_display_carries_code_prefix() {
    for err in all_variants() {
        let message = err.to_string();
        assert!(
            message.starts_with(&format!("[{}]", err.code())),
            "{message}"
        );
    }
}

// -------------------------------------------------------------------------
// Message content
// -------------------------------------------------------------------------

#[test]
fn test_unsupported_operator_message_names_family() {
    let err = CompileError::UnsupportedOperator {
        field: "mac".into(),
        operator: "contains".into(),
        family: FieldTypeFamily::MacAddress,
    };

    assert_eq!(
        err.to_string(),
        "[PGW-001] Operator 'contains' is not supported for field 'mac' (mac_address)"
    );
}

#[test]
fn test_empty_group_message_has_tree_path() {
    let err = CompileError::EmptyGroup {
        path: "AND[1].OR".into(),
    };
    assert_eq!(err.to_string(), "[PGW-004] Empty group at 'AND[1].OR'");
}

#[test]
fn test_too_complex_message() {
    let err = CompileError::TooComplex {
        what: "conditions",
        limit: 2,
        actual: 3,
    };
    assert_eq!(
        err.to_string(),
        "[PGW-005] Filter too complex: conditions is 3, limit is 2"
    );
}

// -------------------------------------------------------------------------
// Field accessor
// -------------------------------------------------------------------------

#[test]
fn test_field_accessor() {
    let has_field: Vec<bool> = all_variants()
        .iter()
        .map(|e| e.field().is_some())
        .collect();

    assert_eq!(has_field, vec![true, true, true, false, false, true, false]);
}

#[test]
fn test_field_accessor_values() {
    let err = CompileError::type_mismatch("tags", "list", "string");
    assert_eq!(err.field(), Some("tags"));

    let err = CompileError::InvalidFieldPath {
        path: "a..b".into(),
        reason: "empty key".into(),
    };
    assert_eq!(err.field(), Some("a..b"));
}

#[test]
fn test_json_error_converts() {
    // Arrange
    let parse = || -> Result<serde_json::Value> { Ok(serde_json::from_str("not json")?) };

    // Act
    let err = parse().unwrap_err();

    // Assert
    assert_eq!(err.code(), "PGW-007");
}
