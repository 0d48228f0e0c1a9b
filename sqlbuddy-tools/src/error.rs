use thiserror::Error;

/// Error types for response parsing, generation and query gating
#[derive(Error, Debug)]
pub enum SqlBuddyError {
    /// No SQL could be extracted from a model response
    #[error("Generation parse error: {message}")]
    GenerationParse { message: String },

    /// The generation collaborator failed to produce a response
    #[error("Generation failed: {message}")]
    Generation { message: String },

    /// A query was handed to execution while its validation report rejects it
    #[error("Query validation failed: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    /// A caller-supplied pattern did not compile
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid caller input
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl SqlBuddyError {
    /// Create a generation parse error
    pub fn generation_parse<S: Into<String>>(message: S) -> Self {
        Self::GenerationParse {
            message: message.into(),
        }
    }

    /// Create a generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern<S: Into<String>>(pattern: &str, message: S) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
