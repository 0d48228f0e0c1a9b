use regex::Regex;
use std::sync::LazyLock;

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment regex"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)--.*$").expect("valid line comment regex"));

static TABLE_REFERENCES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)\bFROM\s+([`"]?\w+[`"]?)"#,
        r#"(?i)\bJOIN\s+([`"]?\w+[`"]?)"#,
        r#"(?i)\bINTO\s+([`"]?\w+[`"]?)"#,
        r#"(?i)\bUPDATE\s+([`"]?\w+[`"]?)"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid table reference regex"))
    .collect()
});

/// Strips comments, collapses whitespace and drops trailing terminators
pub fn sanitize_query(query: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(query, "");
    let without_comments = LINE_COMMENT.replace_all(&without_blocks, "");

    let normalized = without_comments.split_whitespace().collect::<Vec<_>>().join(" ");

    normalized.trim_end_matches(';').trim().to_string()
}

/// Table names referenced after FROM, JOIN, INTO and UPDATE.
///
/// Names are unquoted and de-duplicated; order follows the keyword list, then position.
pub fn extract_tables_from_query(query: &str) -> Vec<String> {
    let mut tables: Vec<String> = Vec::new();

    for pattern in TABLE_REFERENCES.iter() {
        for caps in pattern.captures_iter(query) {
            if let Some(name) = caps.get(1) {
                let name = name.as_str().trim_matches(|c: char| c == '`' || c == '"');
                if !tables.iter().any(|t| t == name) {
                    tables.push(name.to_string());
                }
            }
        }
    }

    tables
}
