//! Tests for operator strategies and the precedence table.

use super::registry::{StrategyRegistry, STANDARD_STRATEGIES};
use super::*;
use crate::sql::PlaceholderStyle;
use serde_json::json;

fn compile_leaf(
    field: &str,
    family: FieldTypeFamily,
    operator: &str,
    value: serde_json::Value,
) -> Result<(String, Vec<SqlParam>)> {
    let path = FieldPath::parse(field)?;
    let ctx = BuildContext::new(&path, family, true);
    let (op, strategy) = StrategyRegistry::standard().resolve(field, operator, family)?;
    let fragment = strategy.build(&ctx, op, &LiteralValue::from(value))?;
    let rendered = fragment.render(PlaceholderStyle::Format);
    Ok((rendered.sql, rendered.params))
}

fn sql_of(field: &str, family: FieldTypeFamily, operator: &str, value: serde_json::Value) -> String {
    compile_leaf(field, family, operator, value)
        .expect("compile leaf")
        .0
}

fn kind_for(operator: Operator, family: FieldTypeFamily) -> Option<StrategyKind> {
    StrategyRegistry::standard()
        .find(operator, family)
        .map(|s| s.kind)
}

// ========================================================================
// Operator vocabulary
// ========================================================================

#[test]
fn test_operator_parse_round_trips_canonical_names() {
    for op in Operator::ALL {
        assert_eq!(Operator::parse(op.as_str()), Some(*op));
    }
}

#[test]
fn test_operator_aliases() {
    assert_eq!(Operator::parse("ne"), Some(Operator::Neq));
    assert_eq!(Operator::parse("nin"), Some(Operator::NotIn));
    assert_eq!(Operator::parse("not_in"), Some(Operator::NotIn));
    assert_eq!(Operator::parse("between"), None);
    assert!(!Operator::is_operator_name("profile"));
}

// ========================================================================
// Precedence
// ========================================================================

#[test]
fn test_standard_precedence_order() {
    let kinds: Vec<StrategyKind> = STANDARD_STRATEGIES.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [
            StrategyKind::NullCheck,
            StrategyKind::DateRange,
            StrategyKind::HierarchicalPath,
            StrategyKind::MacAddress,
            StrategyKind::IpNetwork,
            StrategyKind::Vector,
            StrategyKind::Boolean,
            StrategyKind::Numeric,
            StrategyKind::PatternMatching,
            StrategyKind::GenericList,
            StrategyKind::GenericComparison,
        ]
    );
}

#[test]
fn test_specific_families_never_fall_back_to_generic() {
    let specific = [
        (FieldTypeFamily::MacAddress, StrategyKind::MacAddress),
        (FieldTypeFamily::DateRange, StrategyKind::DateRange),
        (FieldTypeFamily::IpNetwork, StrategyKind::IpNetwork),
        (FieldTypeFamily::HierarchicalPath, StrategyKind::HierarchicalPath),
    ];

    for (family, own) in specific {
        for op in [Operator::Eq, Operator::Neq, Operator::In, Operator::NotIn] {
            assert_eq!(kind_for(op, family), Some(own), "{op} on {family}");
        }
        assert_eq!(kind_for(Operator::Contains, family), None);
        assert_eq!(kind_for(Operator::Gt, family), None);
    }
}

#[test]
fn test_isnull_resolves_for_every_family() {
    for family in FieldTypeFamily::ALL {
        assert_eq!(kind_for(Operator::IsNull, family), Some(StrategyKind::NullCheck));
    }
}

#[test]
fn test_resolve_unknown_operator_is_unsupported() {
    let err = StrategyRegistry::standard()
        .resolve("name", "between", FieldTypeFamily::Text)
        .unwrap_err();
    assert_eq!(err.code(), "PGW-001");
    assert!(err.to_string().contains("between"));
}

#[test]
fn test_resolve_undeclared_operator_for_family_is_unsupported() {
    let err = compile_leaf("mac", FieldTypeFamily::MacAddress, "contains", json!("aa")).unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnsupportedOperator {
            family: FieldTypeFamily::MacAddress,
            ..
        }
    ));
}

#[test]
fn test_custom_registry_respects_given_order() {
    // Arrange
    let registry = StrategyRegistry::new(vec![comparison::STRATEGY, pattern::STRATEGY]);

    // Act
    let strategy = registry.find(Operator::Eq, FieldTypeFamily::Text);

    // Assert
    assert_eq!(strategy.map(|s| s.kind), Some(StrategyKind::GenericComparison));
    assert!(registry.find(Operator::IsNull, FieldTypeFamily::Text).is_none());
    assert_eq!(registry.strategies().len(), 2);
}

#[test]
fn test_claimed_families() {
    assert_eq!(pattern::STRATEGY.claimed_families(), [FieldTypeFamily::Text, FieldTypeFamily::Unknown]);
    assert_eq!(null_check::STRATEGY.claimed_families().len(), FieldTypeFamily::ALL.len());
}

// ========================================================================
// Scalar families
// ========================================================================

#[test]
fn test_text_equality() {
    let (sql, params) = compile_leaf("name", FieldTypeFamily::Text, "eq", json!("Alice")).unwrap();
    assert_eq!(sql, "(data ->> 'name') = %s");
    assert_eq!(params, vec![SqlParam::Text("Alice".into())]);
}

#[test]
fn test_text_neq_and_alias() {
    assert_eq!(
        sql_of("name", FieldTypeFamily::Text, "ne", json!("Bob")),
        "(data ->> 'name') != %s"
    );
}

#[test]
fn test_text_comparison_binds_numbers_as_text() {
    let (_, params) = compile_leaf("code", FieldTypeFamily::Text, "eq", json!(42)).unwrap();
    assert_eq!(params, vec![SqlParam::Text("42".into())]);
}

#[test]
fn test_numeric_comparison() {
    let (sql, params) = compile_leaf("age", FieldTypeFamily::Numeric, "gte", json!(18)).unwrap();
    assert_eq!(sql, "(data ->> 'age')::numeric >= %s::numeric");
    assert_eq!(params, vec![SqlParam::Int(18)]);
}

#[test]
fn test_numeric_string_bound_as_text() {
    let (_, params) =
        compile_leaf("price", FieldTypeFamily::Numeric, "lt", json!("12345678901234567890.5"))
            .unwrap();
    assert_eq!(params, vec![SqlParam::Text("12345678901234567890.5".into())]);
}

#[test]
fn test_numeric_integer_beyond_i64_bound_as_exact_text() {
    let (sql, params) = compile_leaf(
        "counter",
        FieldTypeFamily::Numeric,
        "eq",
        json!(9_223_372_036_854_775_809_u64),
    )
    .unwrap();

    assert_eq!(sql, "(data ->> 'counter')::numeric = %s::numeric");
    assert_eq!(params, vec![SqlParam::Text("9223372036854775809".into())]);
}

#[test]
fn test_numeric_rejects_non_numeric_string() {
    let err = compile_leaf("price", FieldTypeFamily::Numeric, "lt", json!("cheap")).unwrap_err();
    assert_eq!(err.code(), "PGW-003");
    assert_eq!(err.field(), Some("price"));
}

#[test]
fn test_boolean_equality() {
    let (sql, params) = compile_leaf("active", FieldTypeFamily::Boolean, "eq", json!(true)).unwrap();
    assert_eq!(sql, "(data ->> 'active')::boolean = %s::boolean");
    assert_eq!(params, vec![SqlParam::Bool(true)]);

    let (_, params) = compile_leaf("active", FieldTypeFamily::Boolean, "neq", json!("false")).unwrap();
    assert_eq!(params, vec![SqlParam::Bool(false)]);
}

#[test]
fn test_typed_comparisons_validate() {
    assert_eq!(
        sql_of(
            "owner_id",
            FieldTypeFamily::Uuid,
            "eq",
            json!("550e8400-e29b-41d4-a716-446655440000")
        ),
        "(data ->> 'owner_id')::uuid = %s::uuid"
    );
    assert_eq!(
        sql_of("created_at", FieldTypeFamily::DateTime, "gt", json!("2024-01-01T00:00:00Z")),
        "(data ->> 'created_at')::timestamptz > %s::timestamptz"
    );
    assert_eq!(
        sql_of("birth_date", FieldTypeFamily::Date, "lte", json!("2000-12-31")),
        "(data ->> 'birth_date')::date <= %s::date"
    );

    let err = compile_leaf("owner_id", FieldTypeFamily::Uuid, "eq", json!("nope")).unwrap_err();
    assert_eq!(err.code(), "PGW-003");
}

// ========================================================================
// Pattern matching
// ========================================================================

#[test]
fn test_contains_escapes_like_metacharacters() {
    let (sql, params) =
        compile_leaf("title", FieldTypeFamily::Text, "contains", json!("50%_off")).unwrap();
    assert_eq!(sql, "(data ->> 'title') LIKE %s");
    assert_eq!(params, vec![SqlParam::Text("%50\\%\\_off%".into())]);
}

#[test]
fn test_pattern_operator_shapes() {
    let cases = [
        ("icontains", "ILIKE", "%ab%"),
        ("startswith", "LIKE", "ab%"),
        ("istartswith", "ILIKE", "ab%"),
        ("endswith", "LIKE", "%ab"),
        ("iendswith", "ILIKE", "%ab"),
        ("matches", "~", "ab"),
        ("imatches", "~*", "ab"),
        ("not_matches", "!~", "ab"),
        ("like", "LIKE", "ab"),
        ("ilike", "ILIKE", "ab"),
    ];

    for (op, keyword, pattern) in cases {
        let (sql, params) = compile_leaf("title", FieldTypeFamily::Unknown, op, json!("ab")).unwrap();
        assert_eq!(sql, format!("(data ->> 'title') {keyword} %s"), "{op}");
        assert_eq!(params, vec![SqlParam::Text(pattern.into())], "{op}");
    }
}

#[test]
fn test_pattern_rejects_non_string() {
    let err = compile_leaf("title", FieldTypeFamily::Text, "contains", json!(5)).unwrap_err();
    assert_eq!(err.code(), "PGW-002");
}

// ========================================================================
// Lists and null checks
// ========================================================================

#[test]
fn test_in_list_of_booleans_uses_boolean_cast() {
    let (sql, params) =
        compile_leaf("status", FieldTypeFamily::Boolean, "in", json!([true, false])).unwrap();
    assert_eq!(
        sql,
        "(data ->> 'status')::boolean IN (%s::boolean, %s::boolean)"
    );
    assert_eq!(params.len(), 2);
}

#[test]
fn test_notin_text_list_has_no_casts() {
    assert_eq!(
        sql_of("tag", FieldTypeFamily::Text, "nin", json!(["a", "b", "c"])),
        "(data ->> 'tag') NOT IN (%s, %s, %s)"
    );
}

#[test]
fn test_in_numbers_cast_numeric() {
    assert_eq!(
        sql_of("score", FieldTypeFamily::Numeric, "in", json!([1.5, 2])),
        "(data ->> 'score')::numeric IN (%s::numeric, %s::numeric)"
    );
}

#[test]
fn test_in_heterogeneous_list_is_type_mismatch() {
    let err = compile_leaf("status", FieldTypeFamily::Numeric, "in", json!([1, "x"])).unwrap_err();
    assert!(matches!(err, CompileError::TypeMismatch { .. }));
}

#[test]
fn test_in_empty_list_is_type_mismatch() {
    let err = compile_leaf("tags", FieldTypeFamily::Text, "in", json!([])).unwrap_err();
    match err {
        CompileError::TypeMismatch { expected, .. } => assert_eq!(expected, "non-empty list"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_in_non_list_is_type_mismatch() {
    let err = compile_leaf("tags", FieldTypeFamily::Text, "in", json!("a")).unwrap_err();
    assert_eq!(err.code(), "PGW-002");
}

#[test]
fn test_isnull_true_and_false() {
    let (sql, params) = compile_leaf("email", FieldTypeFamily::Text, "isnull", json!(true)).unwrap();
    assert_eq!(sql, "(data ->> 'email') IS NULL");
    assert!(params.is_empty());
    assert_eq!(
        sql_of("email", FieldTypeFamily::MacAddress, "isnull", json!(false)),
        "(data ->> 'email') IS NOT NULL"
    );
    assert!(compile_leaf("email", FieldTypeFamily::Text, "isnull", json!("yes")).is_err());
}

// ========================================================================
// Network, MAC, ltree, date range
// ========================================================================

#[test]
fn test_inet_subnet_operators() {
    let (sql, params) =
        compile_leaf("ip", FieldTypeFamily::IpNetwork, "insubnet", json!("192.168.0.0/16")).unwrap();
    assert_eq!(sql, "(data ->> 'ip')::inet <<= %s::inet");
    assert_eq!(params, vec![SqlParam::Text("192.168.0.0/16".into())]);

    assert_eq!(
        sql_of("ip", FieldTypeFamily::IpNetwork, "containssubnet", json!("10.1.2.3")),
        "(data ->> 'ip')::inet >>= %s::inet"
    );
    assert_eq!(
        sql_of("ip", FieldTypeFamily::IpNetwork, "overlaps", json!("10.0.0.0/8")),
        "(data ->> 'ip')::inet && %s::inet"
    );
    assert_eq!(
        sql_of("ip", FieldTypeFamily::IpNetwork, "strictleft", json!("10.0.0.1")),
        "(data ->> 'ip')::inet < %s::inet"
    );
    assert_eq!(
        sql_of("ip", FieldTypeFamily::IpNetwork, "strictright", json!("10.0.0.1")),
        "(data ->> 'ip')::inet > %s::inet"
    );
}

#[test]
fn test_inet_rejects_bad_cidr() {
    let err = compile_leaf("ip", FieldTypeFamily::IpNetwork, "insubnet", json!("10.0.0.0/40"))
        .unwrap_err();
    match err {
        CompileError::MalformedLiteral { field, value, .. } => {
            assert_eq!(field, "ip");
            assert!(value.contains("10.0.0.0/40"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_inet_private_and_public() {
    let (private, params) =
        compile_leaf("ip", FieldTypeFamily::IpNetwork, "isprivate", json!(true)).unwrap();
    assert!(params.is_empty());
    assert!(private.starts_with("((data ->> 'ip')::inet <<= '10.0.0.0/8'::inet OR "));
    assert!(private.contains("'fe80::/10'::inet"));

    let public = sql_of("ip", FieldTypeFamily::IpNetwork, "ispublic", json!(true));
    assert_eq!(public, format!("NOT {private}"));

    let not_private = sql_of("ip", FieldTypeFamily::IpNetwork, "isprivate", json!(false));
    assert_eq!(not_private, public);
}

#[test]
fn test_inet_family_and_loopback() {
    assert_eq!(
        sql_of("ip", FieldTypeFamily::IpNetwork, "isipv4", json!(true)),
        "family((data ->> 'ip')::inet) = 4"
    );
    assert_eq!(
        sql_of("ip", FieldTypeFamily::IpNetwork, "isipv6", json!(false)),
        "family((data ->> 'ip')::inet) != 6"
    );
    assert_eq!(
        sql_of("ip", FieldTypeFamily::IpNetwork, "isloopback", json!(true)),
        "((data ->> 'ip')::inet <<= '127.0.0.0/8'::inet OR (data ->> 'ip')::inet <<= '::1/128'::inet)"
    );
}

#[test]
fn test_inet_address_range() {
    let (sql, params) = compile_leaf(
        "ip",
        FieldTypeFamily::IpNetwork,
        "inrange",
        json!({"from": "192.168.1.1", "to": "192.168.1.100"}),
    )
    .unwrap();

    assert_eq!(
        sql,
        "((data ->> 'ip')::inet >= %s::inet AND (data ->> 'ip')::inet <= %s::inet)"
    );
    assert_eq!(
        params,
        vec![
            SqlParam::Text("192.168.1.1".into()),
            SqlParam::Text("192.168.1.100".into()),
        ]
    );
}

#[test]
fn test_inet_address_range_validates_bounds() {
    let range = |value| compile_leaf("ip", FieldTypeFamily::IpNetwork, "inrange", value);

    assert!(matches!(
        range(json!({"from": "10.0.0.1", "to": "10.0.0.300"})),
        Err(CompileError::MalformedLiteral { .. })
    ));
    assert!(matches!(
        range(json!({"from": "10.0.0.1"})),
        Err(CompileError::MalformedLiteral { .. })
    ));
    assert!(matches!(
        range(json!({"from": "10.0.0.1", "to": "10.0.0.9", "step": 1})),
        Err(CompileError::MalformedLiteral { .. })
    ));
    assert!(matches!(
        range(json!({"from": 1, "to": "10.0.0.9"})),
        Err(CompileError::TypeMismatch { .. })
    ));
    assert!(matches!(
        range(json!("10.0.0.1-10.0.0.9")),
        Err(CompileError::TypeMismatch { .. })
    ));
}

#[test]
fn test_mac_equality_and_membership() {
    let (sql, params) =
        compile_leaf("mac", FieldTypeFamily::MacAddress, "eq", json!("aa:bb:cc:dd:ee:ff")).unwrap();
    assert_eq!(sql, "(data ->> 'mac')::macaddr = %s::macaddr");
    assert_eq!(params.len(), 1);

    assert_eq!(
        sql_of(
            "mac",
            FieldTypeFamily::MacAddress,
            "notin",
            json!(["08002b010203", "0800.2b01.0203"])
        ),
        "(data ->> 'mac')::macaddr NOT IN (%s::macaddr, %s::macaddr)"
    );

    let err = compile_leaf("mac", FieldTypeFamily::MacAddress, "eq", json!("aa:bb")).unwrap_err();
    assert_eq!(err.code(), "PGW-003");
}

#[test]
fn test_ltree_operators() {
    assert_eq!(
        sql_of("category_path", FieldTypeFamily::HierarchicalPath, "ancestor_of", json!("top.science")),
        "(data ->> 'category_path')::ltree @> %s::ltree"
    );
    assert_eq!(
        sql_of("p", FieldTypeFamily::HierarchicalPath, "descendant_of", json!("top")),
        "(data ->> 'p')::ltree <@ %s::ltree"
    );
    assert_eq!(
        sql_of("p", FieldTypeFamily::HierarchicalPath, "depth_gt", json!(2)),
        "nlevel((data ->> 'p')::ltree) > %s::integer"
    );
    assert_eq!(
        sql_of("p", FieldTypeFamily::HierarchicalPath, "matches_lquery", json!("*.science.*")),
        "(data ->> 'p')::ltree ~ %s::lquery"
    );
    assert_eq!(
        sql_of("p", FieldTypeFamily::HierarchicalPath, "matches_ltxtquery", json!("astro & !physics")),
        "(data ->> 'p')::ltree @ %s::ltxtquery"
    );
    assert_eq!(
        sql_of("p", FieldTypeFamily::HierarchicalPath, "matches_any_lquery", json!(["a.*", "*.b"])),
        "(data ->> 'p')::ltree ? ARRAY[%s::lquery, %s::lquery]"
    );
}

#[test]
fn test_ltree_validation() {
    let bad_path =
        compile_leaf("p", FieldTypeFamily::HierarchicalPath, "eq", json!("a..b")).unwrap_err();
    let negative =
        compile_leaf("p", FieldTypeFamily::HierarchicalPath, "depth_eq", json!(-1)).unwrap_err();
    let not_int =
        compile_leaf("p", FieldTypeFamily::HierarchicalPath, "depth_eq", json!("3")).unwrap_err();

    assert_eq!(bad_path.code(), "PGW-003");
    assert_eq!(negative.code(), "PGW-003");
    assert_eq!(not_int.code(), "PGW-002");
}

#[test]
fn test_daterange_operators() {
    let cases = [
        ("overlaps", "&&"),
        ("adjacent", "-|-"),
        ("strictly_left", "<<"),
        ("strictly_right", ">>"),
        ("not_left", "&>"),
        ("not_right", "&<"),
    ];
    for (op, symbol) in cases {
        assert_eq!(
            sql_of("validity", FieldTypeFamily::DateRange, op, json!("[2024-01-01,2024-06-30)")),
            format!("(data ->> 'validity')::daterange {symbol} %s::daterange"),
            "{op}"
        );
    }

    assert_eq!(
        sql_of("validity", FieldTypeFamily::DateRange, "contains_date", json!("2024-03-01")),
        "(data ->> 'validity')::daterange @> %s::date"
    );
}

#[test]
fn test_daterange_rejects_inverted_bounds() {
    let err = compile_leaf(
        "validity",
        FieldTypeFamily::DateRange,
        "overlaps",
        json!("[2024-06-30,2024-01-01)"),
    )
    .unwrap_err();
    assert_eq!(err.code(), "PGW-003");
}

// ========================================================================
// Vector
// ========================================================================

#[test]
fn test_vector_distance_is_scalar() {
    let path = FieldPath::parse("embedding").unwrap();
    let ctx = BuildContext::new(&path, FieldTypeFamily::Vector, true);
    let value = LiteralValue::from(json!([0.1, 0.2, 3]));

    let fragment = vector::STRATEGY
        .build(&ctx, Operator::CosineDistance, &value)
        .unwrap();
    let rendered = fragment.render(PlaceholderStyle::Format);

    assert!(!fragment.is_predicate());
    assert_eq!(rendered.sql, "((data ->> 'embedding')::vector <=> %s::vector)");
    assert_eq!(rendered.params, vec![SqlParam::Text("[0.1,0.2,3]".into())]);
}

#[test]
fn test_vector_operator_symbols() {
    let cases = [
        ("l2_distance", "<->"),
        ("inner_product", "<#>"),
        ("l1_distance", "<+>"),
    ];
    for (op, symbol) in cases {
        assert_eq!(
            sql_of("embedding", FieldTypeFamily::Vector, op, json!([1, 2])),
            format!("((data ->> 'embedding')::vector {symbol} %s::vector)")
        );
    }
}

#[test]
fn test_bit_distances_cast_to_bit_length() {
    assert_eq!(
        sql_of("fingerprint", FieldTypeFamily::Vector, "hamming_distance", json!("1011")),
        "((data ->> 'fingerprint')::bit(4) <~> %s::bit(4))"
    );

    // `%` inside trusted SQL is doubled in format style
    let (sql, params) =
        compile_leaf("fingerprint", FieldTypeFamily::Vector, "jaccard_distance", json!([1, 0, 1]))
            .unwrap();
    assert_eq!(sql, "((data ->> 'fingerprint')::bit(3) <%%> %s::bit(3))");
    assert_eq!(params, vec![SqlParam::Text("101".into())]);
}

#[test]
fn test_vector_rejects_bad_literals() {
    let empty = compile_leaf("embedding", FieldTypeFamily::Vector, "l2_distance", json!([])).unwrap_err();
    let strings =
        compile_leaf("embedding", FieldTypeFamily::Vector, "l2_distance", json!(["a"])).unwrap_err();
    let bits =
        compile_leaf("embedding", FieldTypeFamily::Vector, "hamming_distance", json!("10x")).unwrap_err();

    assert_eq!(empty.code(), "PGW-003");
    assert_eq!(strings.code(), "PGW-003");
    assert_eq!(bits.code(), "PGW-003");
}

// ========================================================================
// Operator-implied families
// ========================================================================

#[test]
fn test_implied_family_for_exclusive_operators() {
    let registry = StrategyRegistry::standard();

    assert_eq!(
        registry.implied_family(Operator::HammingDistance),
        Some(FieldTypeFamily::Vector)
    );
    assert_eq!(
        registry.implied_family(Operator::IsPrivate),
        Some(FieldTypeFamily::IpNetwork)
    );
    assert_eq!(
        registry.implied_family(Operator::InRange),
        Some(FieldTypeFamily::IpNetwork)
    );
    assert_eq!(
        registry.implied_family(Operator::AncestorOf),
        Some(FieldTypeFamily::HierarchicalPath)
    );
    assert_eq!(
        registry.implied_family(Operator::ContainsDate),
        Some(FieldTypeFamily::DateRange)
    );
}

#[test]
fn test_shared_operators_imply_nothing() {
    let registry = StrategyRegistry::standard();

    for op in [Operator::Eq, Operator::In, Operator::IsNull, Operator::Overlaps] {
        assert_eq!(registry.implied_family(op), None, "{op}");
    }
}

#[test]
fn test_flag_operators() {
    let flags: Vec<_> = Operator::ALL.iter().filter(|op| op.takes_flag()).collect();
    assert_eq!(
        flags,
        [
            &Operator::IsNull,
            &Operator::IsPrivate,
            &Operator::IsPublic,
            &Operator::IsIpv4,
            &Operator::IsIpv6,
            &Operator::IsLoopback,
        ]
    );
}

// ========================================================================
// Column mode
// ========================================================================

#[test]
fn test_column_mode_uses_quoted_column() {
    let path = FieldPath::parse("Age").unwrap();
    let ctx = BuildContext::new(&path, FieldTypeFamily::Numeric, false);

    let fragment = numeric::STRATEGY
        .build(&ctx, Operator::Gt, &LiteralValue::Int(3))
        .unwrap();

    assert_eq!(
        fragment.render(PlaceholderStyle::Numbered).sql,
        "(\"Age\")::numeric > $1::numeric"
    );
}
