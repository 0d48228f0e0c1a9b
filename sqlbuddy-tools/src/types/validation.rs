use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SqlBuddyError;

/// Safety and well-formedness classification of one SQL string.
///
/// Every reason for `is_valid == false` is listed in `errors`; `warnings` never block
/// execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    #[schemars(description = "False blocks execution")]
    pub is_valid: bool,

    #[schemars(description = "Reasons the query is invalid")]
    pub errors: Vec<String>,

    #[schemars(description = "Non-blocking concerns")]
    pub warnings: Vec<String>,

    #[schemars(description = "Query matches a data or structure destroying pattern")]
    pub is_destructive: bool,

    #[schemars(description = "Query matches an injection-style pattern")]
    pub is_suspicious: bool,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            is_destructive: false,
            is_suspicious: false,
        }
    }
}

impl ValidationReport {
    pub(crate) fn reject<S: Into<String>>(&mut self, error: S) {
        self.is_valid = false;
        self.errors.push(error.into());
    }

    pub(crate) fn warn<S: Into<String>>(&mut self, warning: S) {
        self.warnings.push(warning.into());
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Gate for the execution collaborator: refuses invalid queries and surfaces warnings
    /// without blocking.
    pub fn ensure_executable(&self) -> Result<(), SqlBuddyError> {
        if !self.is_valid {
            tracing::warn!("Refusing to execute query: {:?}", self.errors);
            return Err(SqlBuddyError::ValidationFailed {
                errors: self.errors.clone(),
            });
        }

        for warning in &self.warnings {
            tracing::warn!("Query warning: {}", warning);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_is_valid() {
        let report = ValidationReport::default();
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(!report.has_warnings());
        assert!(report.ensure_executable().is_ok());
    }

    #[test]
    fn test_reject_keeps_errors_and_validity_in_step() {
        let mut report = ValidationReport::default();
        report.reject("No valid SQL command found");
        assert!(!report.is_valid);

        match report.ensure_executable() {
            Err(SqlBuddyError::ValidationFailed { errors }) => {
                assert_eq!(errors, vec!["No valid SQL command found".to_string()]);
            }
            other => panic!("Expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_warnings_do_not_block_execution() {
        let mut report = ValidationReport::default();
        report.warn("Unbalanced quotes detected");
        assert!(report.has_warnings());
        assert!(report.ensure_executable().is_ok());
    }

    #[test]
    fn test_json_schema_lists_report_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(ValidationReport)).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for field in ["is_valid", "errors", "warnings", "is_destructive", "is_suspicious"] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
    }
}
