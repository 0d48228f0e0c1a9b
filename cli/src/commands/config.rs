//! Configuration management command implementations

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, DEFAULT_CONFIG},
    error::CliError,
};
use std::path::Path;
use tracing::info;

/// Handle configuration management operations
pub async fn handle_config_command(
    action: &ConfigCommands,
    config: &AppConfig,
    config_path: &Path,
) -> Result<(), CliError> {
    match action {
        ConfigCommands::Show => show_config(config, config_path),
        ConfigCommands::Init => init_config(config_path).await,
    }
}

/// Print the effective configuration as TOML
fn show_config(config: &AppConfig, config_path: &Path) -> Result<(), CliError> {
    println!("# {}", config_path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Write the default configuration file, never replacing an existing one
async fn init_config(config_path: &Path) -> Result<(), CliError> {
    if config_path.exists() {
        return Err(CliError::Config(format!(
            "{} already exists",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(config_path, DEFAULT_CONFIG).await?;

    info!("Wrote default configuration to {}", config_path.display());
    println!("Created {}", config_path.display());
    Ok(())
}
