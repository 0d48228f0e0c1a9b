use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use sqlbuddy_tools::{DatabaseKind, PatternSpec, QueryValidator, SqlBuddyError};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# sqlbuddy configuration

[validation]
# Report destructive statements as warnings instead of errors
allow_destructive = false

# Extra rules appended to the built-in tables. `unless` exempts a match whose span
# also matches it.
# extra_destructive_patterns = [
#   { label = "LOAD DATA", pattern = '\bLOAD\s+DATA\b' },
# ]
# extra_injection_patterns = [
#   { label = "SLEEP call", pattern = '\bSLEEP\s*\(' },
# ]

[generation]
# Options: mysql, postgresql
db_type = "mysql"
"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ValidationConfig {
    #[serde(default)]
    pub allow_destructive: bool,
    #[serde(default)]
    pub extra_destructive_patterns: Vec<PatternSpec>,
    #[serde(default)]
    pub extra_injection_patterns: Vec<PatternSpec>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    #[serde(default)]
    pub db_type: DatabaseKind,
}

impl AppConfig {
    /// Loads `path` (required when given) or the default location (optional), then applies
    /// `SQLBUDDY_` environment overrides such as `SQLBUDDY_VALIDATION__ALLOW_DESTRUCTIVE`.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        let builder = Config::builder()
            .add_source(
                File::from(config_path.clone())
                    .format(FileFormat::Toml)
                    .required(path.is_some()),
            )
            .add_source(
                Environment::with_prefix("SQLBUDDY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: AppConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    /// Validator with the built-in rule tables plus any configured extras
    pub fn validator(&self) -> Result<QueryValidator, SqlBuddyError> {
        let validator = QueryValidator::default();
        let mut destructive = validator.destructive_patterns().clone();
        let mut injection = validator.injection_patterns().clone();

        destructive.extend_from_specs(&self.validation.extra_destructive_patterns)?;
        injection.extend_from_specs(&self.validation.extra_injection_patterns)?;

        Ok(QueryValidator::new(destructive, injection))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("sqlbuddy/sqlbuddy.toml")
    } else {
        PathBuf::from("sqlbuddy.toml")
    }
}
