//! Sanitize and table-extraction commands

use crate::error::CliError;
use sqlbuddy_tools::{extract_tables_from_query, sanitize_query};
use std::path::PathBuf;

use super::input::read_query;

pub async fn sanitize_sql(query: &Option<String>, file: &Option<PathBuf>) -> Result<(), CliError> {
    let query = read_query(query, file).await?;
    println!("{}", sanitize_query(&query));
    Ok(())
}

/// Prints one referenced table per line
pub async fn list_tables(query: &Option<String>, file: &Option<PathBuf>) -> Result<(), CliError> {
    let query = read_query(query, file).await?;
    let query = sanitize_query(&query);

    for table in extract_tables_from_query(&query) {
        println!("{}", table);
    }
    Ok(())
}
