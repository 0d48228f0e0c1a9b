//! Model response parsing command implementation

use crate::{cli::OutputFormat, config::AppConfig, error::CliError};
use sqlbuddy_tools::{GeneratedQuery, ResponseParser};
use std::path::Path;
use tracing::info;

use super::input::read_text;
use super::output::{render, render_generation};
use super::validate::run_validation;

/// Parse a saved model response and optionally validate the extracted query
pub async fn parse_generation(
    file: &Path,
    validate: bool,
    allow_destructive: bool,
    format: &OutputFormat,
    config: &AppConfig,
) -> Result<(), CliError> {
    let response = read_text(file).await?;
    let generated = interpret_response(&response, validate, allow_destructive, config)?;

    println!("{}", render(&generated, format, render_generation)?);

    match &generated.validation {
        Some(report) if !report.is_valid => Err(CliError::Rejected(report.errors.join("; "))),
        _ => Ok(()),
    }
}

pub fn interpret_response(
    response: &str,
    validate: bool,
    allow_destructive: bool,
    config: &AppConfig,
) -> Result<GeneratedQuery, CliError> {
    let parsed = ResponseParser::new().parse(response)?;
    info!("Extracted query referencing {} table(s)", parsed.tables_used.len());

    let validation = if validate {
        Some(run_validation(&parsed.query, allow_destructive, config)?)
    } else {
        None
    };

    Ok(GeneratedQuery { parsed, validation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RESPONSE: &str = "SQL QUERY:\n```sql\nSELECT name FROM users WHERE active = 1;\n```\n\nEXPLANATION:\nActive user names.\n\nTABLES USED:\n- users\n";

    #[test]
    fn test_interpret_with_validation() {
        let generated = interpret_response(RESPONSE, true, false, &AppConfig::default()).unwrap();
        assert_eq!(generated.parsed.query, "SELECT name FROM users WHERE active = 1;");
        assert_eq!(generated.parsed.tables_used, vec!["users".to_string()]);
        assert!(generated.validation.unwrap().is_valid);
    }

    #[test]
    fn test_interpret_without_sql() {
        let err = interpret_response("Sorry, no idea.", true, false, &AppConfig::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 6);
        assert!(err.to_string().contains("no SQL query found in response"));
    }

    #[tokio::test]
    async fn test_parse_file_with_destructive_query() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"```sql\nDELETE FROM sessions;\n```").unwrap();

        let err = parse_generation(file.path(), true, false, &OutputFormat::Json, &AppConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Rejected(_)));

        // Without validation the same response is just reported
        let result =
            parse_generation(file.path(), false, false, &OutputFormat::Text, &AppConfig::default())
                .await;
        assert!(result.is_ok());
    }
}
