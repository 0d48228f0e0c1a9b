//! Response Parser - Structured extraction from free-form model output
//!
//! Pulls a SQL statement plus explanation, table list and optimisation notes out of the text
//! returned by the generation collaborator. The expected layout is:
//!
//! ````text
//! SQL QUERY:
//! ```sql
//! SELECT ...
//! ```
//!
//! EXPLANATION:
//! ...
//!
//! TABLES USED:
//! - users
//!
//! POTENTIAL OPTIMIZATIONS:
//! ...
//! ````
//!
//! The SQL comes from the first fenced `sql` block. Without one, a keyword scan collects
//! lines from the first line mentioning a statement keyword through the first line ending
//! in `;`. Sections are optional and located independently, case-insensitively.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::SqlBuddyError;
use crate::types::ParsedGeneration;

/// Lowercase keywords that start the fallback scan
const SQL_KEYWORDS: &[&str] = &["select", "insert", "update", "delete", "create"];

const NO_SQL_FOUND: &str = "no SQL query found in response";

static DEFAULT_PARSER: LazyLock<ResponseParser> = LazyLock::new(ResponseParser::new);

#[derive(Debug, Clone)]
pub struct ResponseParser {
    sql_fence: Regex,
    explanation_header: Regex,
    tables_header: Regex,
    optimizations_header: Regex,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            sql_fence: pattern(r"```sql\s*(.*?)\s*```"),
            explanation_header: pattern(r"EXPLANATION\s*:"),
            tables_header: pattern(r"TABLES\s+USED\s*:"),
            optimizations_header: pattern(r"POTENTIAL\s+OPTIMIZATIONS\s*:"),
        }
    }

    pub fn parse(&self, response: &str) -> Result<ParsedGeneration, SqlBuddyError> {
        let query = match self.extract_fenced_sql(response) {
            Some(query) => {
                debug!("Extracted SQL from fenced code block");
                query
            }
            None => {
                debug!("No fenced SQL block found, scanning lines for SQL keywords");
                extract_sql_lines(response)
            }
        };

        if query.is_empty() {
            warn!("Model response contained no SQL");
            return Err(SqlBuddyError::generation_parse(NO_SQL_FOUND));
        }

        let explanation = section(
            response,
            &self.explanation_header,
            &[&self.tables_header, &self.optimizations_header],
        )
        .unwrap_or_default();

        let tables_used = section(response, &self.tables_header, &[&self.optimizations_header])
            .map(|text| parse_table_list(&text))
            .unwrap_or_default();

        let optimization_notes =
            section(response, &self.optimizations_header, &[]).unwrap_or_default();

        Ok(ParsedGeneration {
            query,
            explanation,
            tables_used,
            optimization_notes,
            raw_response: response.to_string(),
        })
    }

    /// Trimmed body of the first fenced `sql` block, if any
    pub fn extract_fenced_sql(&self, text: &str) -> Option<String> {
        self.sql_fence
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|body| body.as_str().trim().to_string())
    }
}

pub fn parse_response(response: &str) -> Result<ParsedGeneration, SqlBuddyError> {
    DEFAULT_PARSER.parse(response)
}

pub fn extract_sql_block(text: &str) -> Option<String> {
    DEFAULT_PARSER.extract_fenced_sql(text)
}

fn pattern(source: &str) -> Regex {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("built-in response pattern compiles")
}

/// Text after `start`'s first match up to the earliest following `ends` match
fn section(text: &str, start: &Regex, ends: &[&Regex]) -> Option<String> {
    let body = &text[start.find(text)?.end()..];
    let end = ends
        .iter()
        .filter_map(|pattern| pattern.find(body))
        .map(|m| m.start())
        .min()
        .unwrap_or(body.len());

    Some(body[..end].trim().to_string())
}

fn extract_sql_lines(text: &str) -> String {
    let mut sql_lines = Vec::new();
    let mut in_sql = false;

    for line in text.lines() {
        if !in_sql {
            let lower = line.to_lowercase();
            in_sql = SQL_KEYWORDS.iter().any(|keyword| lower.contains(keyword));
        }

        if in_sql {
            sql_lines.push(line);
            if line.trim().ends_with(';') {
                break;
            }
        }
    }

    sql_lines.join("\n").trim().to_string()
}

fn parse_table_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_matches(|c: char| c == '-' || c.is_whitespace()))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
