use sqlbuddy_tools::{
    parse_response, validate_query, PatternSet, PatternSpec, QueryValidator, SqlBuddyError,
};

#[test]
fn test_generated_response_flows_into_validation() {
    let response = "SQL QUERY:\n```sql\nSELECT * FROM users WHERE id = 1;\n```\n\nEXPLANATION:\nFetches one user.\n\nTABLES USED:\n- users\n";

    let parsed = parse_response(response).unwrap();
    assert_eq!(parsed.query, "SELECT * FROM users WHERE id = 1;");
    assert_eq!(parsed.explanation, "Fetches one user.");
    assert_eq!(parsed.tables_used, vec!["users".to_string()]);

    let report = validate_query(&parsed.query, false);
    assert!(report.is_valid);
    assert!(!report.is_destructive);
    assert!(!report.is_suspicious);
    assert!(report.ensure_executable().is_ok());
}

#[test]
fn test_destructive_generation_is_gated() {
    let response = "Sure, this will clean things up:\nDELETE FROM sessions;\nRun it carefully.";

    let parsed = parse_response(response).unwrap();
    assert_eq!(parsed.query, "DELETE FROM sessions;");

    let report = validate_query(&parsed.query, false);
    assert!(report.is_destructive);
    match report.ensure_executable() {
        Err(SqlBuddyError::ValidationFailed { errors }) => {
            assert!(errors[0].contains("DELETE without WHERE"));
        }
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }

    let report = validate_query(&parsed.query, true);
    assert!(report.ensure_executable().is_ok());
    assert!(report.has_warnings());
}

#[test]
fn test_unparseable_response_never_reaches_validation() {
    match parse_response("The database has no such table.") {
        Err(SqlBuddyError::GenerationParse { message }) => {
            assert_eq!(message, "no SQL query found in response")
        }
        other => panic!("Expected GenerationParse, got {:?}", other),
    }
}

#[test]
fn test_configured_rules_extend_builtins() {
    let mut destructive = PatternSet::destructive();
    destructive
        .extend_from_specs(&[PatternSpec {
            label: "LOAD DATA".to_string(),
            pattern: r"\bLOAD\s+DATA\b".to_string(),
            unless: None,
        }])
        .unwrap();
    let validator = QueryValidator::new(destructive, PatternSet::injection());

    let report = validator.validate("LOAD DATA INFILE 'x.csv' INTO TABLE users; SELECT 1", false);
    assert!(!report.is_valid);
    assert!(report.errors.iter().any(|e| e.contains("LOAD DATA")));
    assert!(report.is_suspicious);

    let report = validator.validate("DROP SCHEMA analytics", false);
    assert!(report.is_destructive);
}
