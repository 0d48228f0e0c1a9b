//! Generation prompt command implementation

use crate::{config::AppConfig, error::CliError};
use sqlbuddy_tools::{build_generation_prompt, DatabaseKind};
use std::path::Path;

use super::input::read_text;

/// Print the prompt a completion provider would receive for this request
pub async fn generate_prompt(
    description: &str,
    schema_file: &Path,
    db_type: &Option<String>,
    context: &Option<String>,
    config: &AppConfig,
) -> Result<(), CliError> {
    let schema = read_text(schema_file).await?;
    let kind = resolve_db_kind(db_type, config)?;

    println!(
        "{}",
        build_generation_prompt(description, schema.trim_end(), kind, context.as_deref())
    );
    Ok(())
}

/// `--db-type` wins over the configured default
pub fn resolve_db_kind(
    db_type: &Option<String>,
    config: &AppConfig,
) -> Result<DatabaseKind, CliError> {
    match db_type {
        Some(name) => Ok(name.parse::<DatabaseKind>()?),
        None => Ok(config.generation.db_type),
    }
}
