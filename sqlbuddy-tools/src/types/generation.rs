use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::ValidationReport;
use crate::error::SqlBuddyError;

/// Structured result of interpreting one model response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedGeneration {
    #[schemars(description = "Extracted SQL statement")]
    pub query: String,

    #[serde(default)]
    pub explanation: String,

    #[serde(default)]
    pub tables_used: Vec<String>,

    #[serde(default)]
    pub optimization_notes: String,

    #[schemars(description = "Untouched model output, kept for diagnostics")]
    pub raw_response: String,
}

/// SQL dialect the prompts are written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum DatabaseKind {
    #[default]
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "postgresql", alias = "postgres")]
    PostgreSql,
}

impl DatabaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::MySql => "mysql",
            DatabaseKind::PostgreSql => "postgresql",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseKind {
    type Err = SqlBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(DatabaseKind::MySql),
            "postgresql" | "postgres" => Ok(DatabaseKind::PostgreSql),
            other => Err(SqlBuddyError::invalid_input(format!(
                "Unsupported database type: {}. Supported types: mysql, postgresql",
                other
            ))),
        }
    }
}

/// A generated query together with its optional validation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuery {
    #[serde(flatten)]
    pub parsed: ParsedGeneration,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum VariationOutcome {
    Generated(GeneratedQuery),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryVariation {
    /// 1-based position in the batch
    pub variation_number: usize,

    #[serde(flatten)]
    pub outcome: VariationOutcome,
}

impl QueryVariation {
    pub fn generated(&self) -> Option<&GeneratedQuery> {
        match &self.outcome {
            VariationOutcome::Generated(query) => Some(query),
            VariationOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryExplanation {
    pub query: String,
    pub analysis: String,
    pub db_kind: DatabaseKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptimization {
    pub original_query: String,
    /// Empty when the response carried no fenced SQL block
    pub optimized_query: String,
    pub optimization_details: String,
    pub db_kind: DatabaseKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub provider: String,
    pub model: String,
    pub db_kind: DatabaseKind,
}
