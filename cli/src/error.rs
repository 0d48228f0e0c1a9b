use sqlbuddy_tools::SqlBuddyError;
use std::fmt;

/// Main error type for the sqlbuddy CLI
#[derive(Debug)]
pub enum CliError {
    /// Configuration-related errors
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// Bad or missing command input
    Input(String),
    /// Query failed validation
    Rejected(String),
    /// Model response could not be interpreted
    Parse(String),
    /// Generic errors from anyhow
    Other(anyhow::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Input(msg) => write!(f, "Input error: {msg}"),
            CliError::Rejected(msg) => write!(f, "Query rejected: {msg}"),
            CliError::Parse(msg) => write!(f, "Parse error: {msg}"),
            CliError::Other(err) => write!(f, "Error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Io(_) => 3,
            CliError::Input(_) => 4,
            CliError::Rejected(_) => 5,
            CliError::Parse(_) => 6,
            CliError::Other(_) => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(err.into())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::Other(err.into())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<SqlBuddyError> for CliError {
    fn from(err: SqlBuddyError) -> Self {
        match err {
            SqlBuddyError::GenerationParse { message } => CliError::Parse(message),
            SqlBuddyError::ValidationFailed { errors } => CliError::Rejected(errors.join("; ")),
            SqlBuddyError::InvalidPattern { .. } => CliError::Config(err.to_string()),
            SqlBuddyError::InvalidInput { message } => CliError::Input(message),
            other => CliError::Other(anyhow::anyhow!(other)),
        }
    }
}
