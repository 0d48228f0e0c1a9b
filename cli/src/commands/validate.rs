//! Query validation command implementation

use crate::{cli::OutputFormat, config::AppConfig, error::CliError};
use sqlbuddy_tools::ValidationReport;
use std::path::PathBuf;
use tracing::debug;

use super::input::read_query;
use super::output::{render, render_report};

/// Validate a query and print the report; an invalid query fails the command
pub async fn validate_sql(
    query: &Option<String>,
    file: &Option<PathBuf>,
    allow_destructive: bool,
    format: &OutputFormat,
    config: &AppConfig,
) -> Result<(), CliError> {
    let query = read_query(query, file).await?;
    let report = run_validation(&query, allow_destructive, config)?;

    println!("{}", render(&report, format, render_report)?);

    if report.is_valid {
        Ok(())
    } else {
        Err(CliError::Rejected(report.errors.join("; ")))
    }
}

/// The `--allow-destructive` flag and the config setting both enable destructive statements
pub fn run_validation(
    query: &str,
    allow_destructive: bool,
    config: &AppConfig,
) -> Result<ValidationReport, CliError> {
    let allow_destructive = allow_destructive || config.validation.allow_destructive;
    debug!("Validating query (allow_destructive={})", allow_destructive);

    let validator = config.validator()?;
    Ok(validator.validate(query, allow_destructive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_allow_destructive() {
        let mut config = AppConfig::default();
        let report = run_validation("DROP TABLE users", false, &config).unwrap();
        assert!(!report.is_valid);

        config.validation.allow_destructive = true;
        let report = run_validation("DROP TABLE users", false, &config).unwrap();
        assert!(report.is_valid);
        assert!(report.is_destructive);
    }

    #[tokio::test]
    async fn test_invalid_query_fails_command() {
        let config = AppConfig::default();
        let err = validate_sql(
            &Some("TRUNCATE TABLE logs".to_string()),
            &None,
            false,
            &OutputFormat::Text,
            &config,
        )
        .await
        .unwrap_err();

        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("TRUNCATE TABLE"));
    }

    #[tokio::test]
    async fn test_suspicious_query_still_passes() {
        let config = AppConfig::default();
        let result = validate_sql(
            &Some("SELECT * FROM users WHERE id=1 OR 1=1".to_string()),
            &None,
            false,
            &OutputFormat::Json,
            &config,
        )
        .await;
        assert!(result.is_ok());
    }
}
