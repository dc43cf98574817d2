//! Tests for `field_path` module - parsing and text path rendering.

use crate::error::CompileError;
use crate::field_path::*;

#[test]
fn test_parse_simple() {
    let path = FieldPath::parse("name").unwrap();
    assert_eq!(path.keys(), ["name"]);
    assert!(path.is_simple());
    assert_eq!(path.column(), DEFAULT_COLUMN);
}

#[test]
fn test_parse_nested() {
    let path = FieldPath::parse("profile.avatarUrl").unwrap();
    assert_eq!(path.keys(), ["profile", "avatarUrl"]);
    assert_eq!(path.leaf(), "avatarUrl");
    assert!(!path.is_simple());
}

#[test]
fn test_parse_empty_error() {
    assert!(matches!(
        FieldPath::parse(""),
        Err(CompileError::InvalidFieldPath { .. })
    ));
    assert!(matches!(
        FieldPath::parse("  "),
        Err(CompileError::InvalidFieldPath { .. })
    ));
}

#[test]
fn test_parse_double_dot_error() {
    let err = FieldPath::parse("a..b").unwrap_err();
    assert_eq!(err.code(), "PGW-006");
    assert_eq!(err.field(), Some("a..b"));
}

#[test]
fn test_new_rejects_nul() {
    let err = FieldPath::new(["bad\0key"]).unwrap_err();
    assert!(err.to_string().contains("NUL"));
}

#[test]
fn test_new_rejects_no_keys() {
    let keys: Vec<String> = Vec::new();
    assert!(FieldPath::new(keys).is_err());
}

#[test]
fn test_text_sql_jsonb_single_key() {
    let path = FieldPath::parse("name").unwrap();
    assert_eq!(path.text_sql(true), "(data ->> 'name')");
}

#[test]
fn test_text_sql_jsonb_nested() {
    let path = FieldPath::parse("a.b.c").unwrap();
    assert_eq!(path.text_sql(true), "(data -> 'a' -> 'b' ->> 'c')");
}

#[test]
fn test_text_sql_custom_column_is_quoted() {
    let path = FieldPath::parse("name").unwrap().with_column("Payload");
    assert_eq!(path.text_sql(true), "(\"Payload\" ->> 'name')");
}

#[test]
fn test_text_sql_escapes_quote_in_key() {
    let path = FieldPath::new(["o'brien"]).unwrap();
    assert_eq!(path.text_sql(true), "(data ->> 'o''brien')");
}

#[test]
fn test_text_sql_column_mode() {
    let simple = FieldPath::parse("age").unwrap();
    let nested = FieldPath::parse("Profile.city").unwrap();
    let reserved = FieldPath::parse("order").unwrap();

    assert_eq!(simple.text_sql(false), "(age)");
    assert_eq!(nested.text_sql(false), "(\"Profile\" ->> 'city')");
    assert_eq!(reserved.text_sql(false), "(\"order\")");
}

#[test]
fn test_display_and_from_str() {
    let path: FieldPath = "server.ip".parse().unwrap();
    assert_eq!(path.to_string(), "server.ip");
}

#[test]
fn test_deserialize_validates_keys() {
    // Arrange
    let valid = serde_json::json!({"keys": ["profile", "city"], "column": "doc"});
    let no_keys = serde_json::json!({"keys": []});
    let empty_key = serde_json::json!({"keys": ["profile", ""]});
    let empty_column = serde_json::json!({"keys": ["a"], "column": ""});

    // Act
    let path: FieldPath = serde_json::from_value(valid).unwrap();

    // Assert
    assert_eq!(path.text_sql(true), "(doc -> 'profile' ->> 'city')");
    assert!(serde_json::from_value::<FieldPath>(no_keys).is_err());
    assert!(serde_json::from_value::<FieldPath>(empty_key).is_err());
    assert!(serde_json::from_value::<FieldPath>(empty_column).is_err());
}

#[test]
fn test_deserialize_defaults_column_and_round_trips() {
    let path: FieldPath = serde_json::from_value(serde_json::json!({"keys": ["name"]})).unwrap();
    assert_eq!(path.column(), DEFAULT_COLUMN);

    let back: FieldPath = serde_json::from_value(serde_json::to_value(&path).unwrap()).unwrap();
    assert_eq!(back, path);
}
