//! Query Validator - Heuristic SQL Safety Gate
//!
//! Classifies a SQL string before it is handed to execution. This is a textual gate, not a
//! parser: it blocks obviously dangerous shapes, warns on ambiguous ones, and never claims
//! semantic correctness.
//!
//! # Checks
//!
//! Checks run in a fixed order and accumulate into one [`ValidationReport`]. Only an empty
//! query short-circuits.
//!
//! 1. **Empty query**: rejected with `Query is empty`.
//! 2. **Destructive patterns** (uppercased query): DROP/TRUNCATE, DELETE or UPDATE without
//!    WHERE, GRANT/REVOKE, ALTER TABLE, CREATE/DROP USER or ROLE. Each match marks the report
//!    destructive; it is an error unless `allow_destructive` is set, in which case it is a
//!    warning.
//! 3. **Injection patterns** (original-case query): stray separators or comment markers,
//!    boolean OR/AND injection, UNION SELECT, EXEC calls. Warnings only.
//! 4. **Command presence**: one of SELECT, INSERT, UPDATE, DELETE, CREATE, ALTER, DROP must
//!    appear.
//! 5. **Balance**: parentheses and quotes. Warnings only.
//!
//! WHERE detection is textual. A WHERE belonging to another statement, or comments and odd
//! whitespace breaking the shape, can mislead it in either direction.
//!
//! # Usage
//!
//! ```rust
//! use sqlbuddy_tools::query_validator::{validate_query, QueryValidator};
//!
//! let report = validate_query("DROP TABLE users;", false);
//! assert!(!report.is_valid);
//! assert!(report.is_destructive);
//!
//! let report = QueryValidator::default().validate("DROP TABLE users;", true);
//! assert!(report.is_valid);
//! ```

use std::sync::LazyLock;
use tracing::debug;

use crate::types::ValidationReport;

pub mod patterns;
pub mod utils;

pub use patterns::{PatternRule, PatternSet, PatternSpec};
pub use utils::{extract_tables_from_query, sanitize_query};

/// Statement keywords, one of which must appear for a query to be accepted
pub const COMMAND_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "ALTER", "DROP",
];

static DEFAULT_VALIDATOR: LazyLock<QueryValidator> = LazyLock::new(QueryValidator::default);

#[derive(Debug, Clone)]
pub struct QueryValidator {
    destructive: PatternSet,
    injection: PatternSet,
    command_keywords: Vec<String>,
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new(PatternSet::destructive(), PatternSet::injection())
    }
}

impl QueryValidator {
    pub fn new(destructive: PatternSet, injection: PatternSet) -> Self {
        Self {
            destructive,
            injection,
            command_keywords: COMMAND_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn with_destructive_rule(mut self, rule: PatternRule) -> Self {
        self.destructive.push(rule);
        self
    }

    pub fn with_injection_rule(mut self, rule: PatternRule) -> Self {
        self.injection.push(rule);
        self
    }

    pub fn destructive_patterns(&self) -> &PatternSet {
        &self.destructive
    }

    pub fn injection_patterns(&self) -> &PatternSet {
        &self.injection
    }

    pub fn validate(&self, query: &str, allow_destructive: bool) -> ValidationReport {
        let mut report = ValidationReport::default();

        if query.trim().is_empty() {
            report.reject("Query is empty");
            return report;
        }

        let query_upper = query.to_uppercase();

        for rule in self.destructive.matches(&query_upper) {
            debug!("Destructive pattern matched: {}", rule.label());
            report.is_destructive = true;
            if allow_destructive {
                report.warn(format!("Destructive operation detected ({})", rule.label()));
            } else {
                report.reject(format!(
                    "Destructive operation detected ({}); set allow_destructive=true to bypass this check",
                    rule.label()
                ));
            }
        }

        for rule in self.injection.matches(strip_terminator(query)) {
            debug!("Injection pattern matched: {}", rule.label());
            report.is_suspicious = true;
            report.warn(format!(
                "Potentially suspicious pattern detected ({})",
                rule.label()
            ));
        }

        if !self
            .command_keywords
            .iter()
            .any(|keyword| query_upper.contains(keyword.as_str()))
        {
            report.reject("No valid SQL command found");
        }

        if count(query, '(') != count(query, ')') {
            report.warn("Unbalanced parentheses detected");
        }

        if count(query, '\'') % 2 != 0 || count(query, '"') % 2 != 0 {
            report.warn("Unbalanced quotes detected");
        }

        report
    }

    /// Validates every query independently; one rejection never stops the batch
    pub fn validate_batch<'a, I>(
        &self,
        queries: I,
        allow_destructive: bool,
    ) -> Vec<ValidationReport>
    where
        I: IntoIterator<Item = &'a str>,
    {
        queries
            .into_iter()
            .map(|query| self.validate(query, allow_destructive))
            .collect()
    }

    /// Valid without destructive operations and free of injection shapes
    pub fn is_safe(&self, query: &str) -> bool {
        let report = self.validate(query, false);
        report.is_valid && !report.is_suspicious
    }
}

/// Validates with the built-in pattern tables
pub fn validate_query(query: &str, allow_destructive: bool) -> ValidationReport {
    DEFAULT_VALIDATOR.validate(query, allow_destructive)
}

pub fn is_safe_query(query: &str) -> bool {
    DEFAULT_VALIDATOR.is_safe(query)
}

/// A single statement terminator at the very end is not a stray separator
fn strip_terminator(query: &str) -> &str {
    let trimmed = query.trim_end();
    trimmed.strip_suffix(';').unwrap_or(trimmed)
}

fn count(text: &str, needle: char) -> usize {
    text.chars().filter(|c| *c == needle).count()
}
