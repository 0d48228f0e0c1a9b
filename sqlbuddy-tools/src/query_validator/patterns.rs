use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::SqlBuddyError;

/// (label, pattern, exemption) rows for operations that irreversibly destroy data or
/// schema, or alter privileges. Matched against the uppercased query.
const DESTRUCTIVE_RULES: &[(&str, &str, Option<&str>)] = &[
    (
        "DROP TABLE/DATABASE/SCHEMA",
        r"\bDROP\s+(?:TABLE|DATABASE|SCHEMA)\b",
        None,
    ),
    ("TRUNCATE TABLE", r"\bTRUNCATE\s+TABLE\b", None),
    ("DELETE without WHERE", r"\bDELETE\s+FROM\s+\w+\s*(?:;|$)", None),
    // Span runs to the statement terminator; a WHERE inside it exempts the match.
    (
        "UPDATE without WHERE",
        r"\bUPDATE\s+\w+\s+SET\b[^;]*",
        Some(r"\bWHERE\b"),
    ),
    ("GRANT", r"\bGRANT\b", None),
    ("REVOKE", r"\bREVOKE\b", None),
    ("ALTER TABLE", r"\bALTER\s+TABLE\b", None),
    ("CREATE USER/ROLE", r"\bCREATE\s+(?:USER|ROLE)\b", None),
    ("DROP USER/ROLE", r"\bDROP\s+(?:USER|ROLE)\b", None),
];

/// Injection-shaped fragments. Matched against the original-case query.
const INJECTION_RULES: &[(&str, &str, Option<&str>)] = &[
    (
        "statement separator or comment marker",
        r"(?:;|--|#|/\*|\*/)",
        None,
    ),
    (
        "boolean injection (OR/AND)",
        r#"(?:['"]\s*(?:OR|AND)\s*['"\d])|(?:\b(?:OR|AND)\s+(?:'[^']*'|"[^"]*"|\d+)\s*=\s*(?:'[^']*'|"[^"]*"|\d+))"#,
        None,
    ),
    ("UNION SELECT", r"\bUNION\s+(?:ALL\s+)?SELECT\b", None),
    ("EXEC/EXECUTE call", r"\b(?:EXEC|EXECUTE)\s*\(", None),
];

/// Source form of a rule, as it appears in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub label: String,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<String>,
}

/// A labelled, case-insensitive pattern with an optional exemption.
///
/// The rule matches a text when some span found by `pattern` does not itself contain a
/// match of `unless`.
#[derive(Debug, Clone)]
pub struct PatternRule {
    label: String,
    pattern: Regex,
    unless: Option<Regex>,
}

impl PatternRule {
    pub fn new(label: &str, pattern: &str) -> Result<Self, SqlBuddyError> {
        Ok(Self {
            label: label.to_string(),
            pattern: compile(pattern)?,
            unless: None,
        })
    }

    pub fn with_exemption(mut self, unless: &str) -> Result<Self, SqlBuddyError> {
        self.unless = Some(compile(unless)?);
        Ok(self)
    }

    pub fn from_spec(spec: &PatternSpec) -> Result<Self, SqlBuddyError> {
        let rule = Self::new(&spec.label, &spec.pattern)?;
        match &spec.unless {
            Some(unless) => rule.with_exemption(unless),
            None => Ok(rule),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, text: &str) -> bool {
        match &self.unless {
            None => self.pattern.is_match(text),
            Some(unless) => self
                .pattern
                .find_iter(text)
                .any(|span| !unless.is_match(span.as_str())),
        }
    }
}

/// Ordered collection of rules; evaluation order is insertion order
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    rules: Vec<PatternRule>,
}

impl PatternSet {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    pub fn from_specs(specs: &[PatternSpec]) -> Result<Self, SqlBuddyError> {
        let rules = specs
            .iter()
            .map(PatternRule::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Built-in destructive operation rules
    pub fn destructive() -> Self {
        builtin(DESTRUCTIVE_RULES)
    }

    /// Built-in injection rules
    pub fn injection() -> Self {
        builtin(INJECTION_RULES)
    }

    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    pub fn extend_from_specs(&mut self, specs: &[PatternSpec]) -> Result<(), SqlBuddyError> {
        for spec in specs {
            self.rules.push(PatternRule::from_spec(spec)?);
        }
        Ok(())
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules matching `text`, in table order
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a PatternRule> + 'a {
        self.rules.iter().filter(move |rule| rule.matches(text))
    }
}

fn compile(pattern: &str) -> Result<Regex, SqlBuddyError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| SqlBuddyError::invalid_pattern(pattern, e.to_string()))
}

fn builtin(table: &[(&str, &str, Option<&str>)]) -> PatternSet {
    let rules = table
        .iter()
        .map(|(label, pattern, unless)| {
            let rule = PatternRule::new(label, pattern).expect("built-in pattern compiles");
            match unless {
                Some(unless) => rule
                    .with_exemption(unless)
                    .expect("built-in exemption compiles"),
                None => rule,
            }
        })
        .collect();
    PatternSet::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels<'a>(set: &'a PatternSet, text: &'a str) -> Vec<&'a str> {
        set.matches(text).map(|rule| rule.label()).collect()
    }

    #[test]
    fn test_builtin_tables_compile_in_order() {
        let destructive = PatternSet::destructive();
        assert_eq!(destructive.len(), DESTRUCTIVE_RULES.len());
        assert_eq!(destructive.rules()[0].label(), "DROP TABLE/DATABASE/SCHEMA");
        assert_eq!(destructive.rules()[8].label(), "DROP USER/ROLE");

        let injection = PatternSet::injection();
        assert_eq!(injection.len(), INJECTION_RULES.len());
        assert_eq!(
            injection.rules()[0].label(),
            "statement separator or comment marker"
        );
    }

    #[test]
    fn test_delete_without_where() {
        let set = PatternSet::destructive();
        assert_eq!(labels(&set, "DELETE FROM USERS"), vec!["DELETE without WHERE"]);
        assert_eq!(labels(&set, "DELETE FROM USERS;"), vec!["DELETE without WHERE"]);
        assert!(labels(&set, "DELETE FROM USERS WHERE ID = 1").is_empty());
    }

    #[test]
    fn test_update_exempted_by_where_before_terminator() {
        let set = PatternSet::destructive();
        assert_eq!(
            labels(&set, "UPDATE USERS SET ACTIVE = 0"),
            vec!["UPDATE without WHERE"]
        );
        assert!(labels(&set, "UPDATE USERS SET ACTIVE = 0 WHERE ID = 7;").is_empty());
        assert!(labels(&set, "UPDATE USERS\nSET ACTIVE = 0\nWHERE ID = 7").is_empty());

        // A WHERE after the terminator belongs to another statement
        assert_eq!(
            labels(&set, "UPDATE USERS SET ACTIVE = 0; SELECT * FROM T WHERE X = 1"),
            vec!["UPDATE without WHERE"]
        );
    }

    #[test]
    fn test_privilege_and_schema_changes() {
        let set = PatternSet::destructive();
        assert_eq!(labels(&set, "GRANT ALL ON DB TO BOB"), vec!["GRANT"]);
        assert_eq!(labels(&set, "REVOKE SELECT ON T FROM BOB"), vec!["REVOKE"]);
        assert_eq!(labels(&set, "ALTER TABLE T ADD C INT"), vec!["ALTER TABLE"]);
        assert_eq!(labels(&set, "CREATE ROLE ADMIN"), vec!["CREATE USER/ROLE"]);
        assert_eq!(labels(&set, "DROP USER BOB"), vec!["DROP USER/ROLE"]);
        assert!(labels(&set, "CREATE TABLE T (ID INT)").is_empty());
    }

    #[test]
    fn test_injection_shapes() {
        let set = PatternSet::injection();
        assert_eq!(
            labels(&set, "SELECT * FROM users WHERE id=1 OR '1'='1'"),
            vec!["boolean injection (OR/AND)"]
        );
        assert_eq!(
            labels(&set, "SELECT * FROM users WHERE name = '' or 1=1"),
            vec!["boolean injection (OR/AND)"]
        );
        assert_eq!(
            labels(&set, "SELECT id FROM a UNION ALL SELECT password FROM b"),
            vec!["UNION SELECT"]
        );
        assert_eq!(labels(&set, "EXEC('xp_cmdshell')"), vec!["EXEC/EXECUTE call"]);
        assert_eq!(labels(&set, "execute ('xp_cmdshell')"), vec!["EXEC/EXECUTE call"]);
        for marker in ["SELECT 1 # x", "SELECT /* c */ 1", "SELECT 1 */", "SELECT 1; SELECT 2"] {
            assert_eq!(
                labels(&set, marker),
                vec!["statement separator or comment marker"],
                "{}",
                marker
            );
        }
        assert_eq!(
            labels(&set, "SELECT * FROM users -- trailing"),
            vec!["statement separator or comment marker"]
        );
        assert!(labels(&set, "SELECT * FROM users WHERE a = 1 AND b = 2").is_empty());
        assert!(labels(&set, "SELECT * FROM users WHERE name = 'bob' AND age > 3").is_empty());
    }

    #[test]
    fn test_rule_from_spec_with_exemption() {
        let spec = PatternSpec {
            label: "MERGE without ON".to_string(),
            pattern: r"\bMERGE\s+INTO\b[^;]*".to_string(),
            unless: Some(r"\bON\b".to_string()),
        };
        let rule = PatternRule::from_spec(&spec).unwrap();
        assert_eq!(rule.label(), "MERGE without ON");
        assert!(rule.matches("merge into t using s"));
        assert!(!rule.matches("MERGE INTO t USING s ON t.id = s.id"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let spec = PatternSpec {
            label: "broken".to_string(),
            pattern: "(unclosed".to_string(),
            unless: None,
        };
        match PatternSet::from_specs(&[spec]) {
            Err(SqlBuddyError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("Expected InvalidPattern, got {:?}", other.map(|s| s.len())),
        }
    }
}
