//! Rendering command results in the selected output format

use crate::{cli::OutputFormat, error::CliError};
use serde::Serialize;
use sqlbuddy_tools::{GeneratedQuery, ValidationReport};

/// Serializes `value` for json/yaml, or delegates to `text` for the human-readable form
pub fn render<T, F>(value: &T, format: &OutputFormat, text: F) -> Result<String, CliError>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?.trim_end().to_string()),
        OutputFormat::Text => Ok(text(value)),
    }
}

pub fn render_report(report: &ValidationReport) -> String {
    let mut lines = vec![
        format!("Status: {}", if report.is_valid { "VALID" } else { "INVALID" }),
        format!("Destructive: {}", yes_no(report.is_destructive)),
        format!("Suspicious: {}", yes_no(report.is_suspicious)),
    ];

    push_list(&mut lines, "Errors", &report.errors);
    push_list(&mut lines, "Warnings", &report.warnings);

    lines.join("\n")
}

pub fn render_generation(generated: &GeneratedQuery) -> String {
    let parsed = &generated.parsed;
    let mut lines = vec!["SQL:".to_string(), parsed.query.clone()];

    if !parsed.explanation.is_empty() {
        lines.push(String::new());
        lines.push("Explanation:".to_string());
        lines.push(parsed.explanation.clone());
    }

    if !parsed.tables_used.is_empty() {
        lines.push(String::new());
        lines.push(format!("Tables used: {}", parsed.tables_used.join(", ")));
    }

    if !parsed.optimization_notes.is_empty() {
        lines.push(String::new());
        lines.push("Potential optimizations:".to_string());
        lines.push(parsed.optimization_notes.clone());
    }

    if let Some(report) = &generated.validation {
        lines.push(String::new());
        lines.push(render_report(report));
    }

    lines.join("\n")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn push_list(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("{}:", title));
    lines.extend(items.iter().map(|item| format!("  - {}", item)));
}
