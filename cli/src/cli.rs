use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::{commands, config::AppConfig, error::CliError};
use commands::*;

#[derive(Debug, Parser)]
#[command(name = "sqlbuddy")]
#[command(about = "Validate and inspect SQL produced by natural-language query generation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a query for destructive, suspicious or malformed SQL
    Validate {
        /// SQL query to validate
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        query: Option<String>,

        /// Read the query from a file (`-` for stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Report destructive statements as warnings
        #[arg(long)]
        allow_destructive: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Extract SQL and sections from a saved model response
    Parse {
        /// Response file (`-` for stdin)
        #[arg(short, long)]
        file: PathBuf,

        /// Validate the extracted query
        #[arg(long)]
        validate: bool,

        /// Report destructive statements as warnings
        #[arg(long, requires = "validate")]
        allow_destructive: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Strip comments and normalize whitespace
    Sanitize {
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        query: Option<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List tables referenced by a query
    Tables {
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        query: Option<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the generation prompt for a request
    Prompt {
        /// Natural-language description of the query
        #[arg(short, long)]
        description: String,

        /// File holding the schema description
        #[arg(short, long)]
        schema_file: PathBuf,

        /// Database type (mysql, postgresql); defaults to the configured one
        #[arg(long)]
        db_type: Option<String>,

        /// Additional context for the model
        #[arg(long)]
        context: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Initialize default configuration
    Init,
}

#[derive(Debug, Clone, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.command {
            Some(Commands::Validate {
                query,
                file,
                allow_destructive,
                format,
            }) => {
                let (config, _) = self.load_config()?;
                validate_sql(query, file, *allow_destructive, format, &config).await
            }
            Some(Commands::Parse {
                file,
                validate,
                allow_destructive,
                format,
            }) => {
                let (config, _) = self.load_config()?;
                parse_generation(file, *validate, *allow_destructive, format, &config).await
            }
            Some(Commands::Sanitize { query, file }) => sanitize_sql(query, file).await,
            Some(Commands::Tables { query, file }) => list_tables(query, file).await,
            Some(Commands::Prompt {
                description,
                schema_file,
                db_type,
                context,
            }) => {
                let (config, _) = self.load_config()?;
                generate_prompt(description, schema_file, db_type, context, &config).await
            }
            Some(Commands::Config { action }) => {
                let (config, path) = self.load_config()?;
                handle_config_command(action, &config, &path).await
            }
            Some(Commands::Version) => self.handle_version(),
            None => {
                println!("sqlbuddy - validate and inspect generated SQL");
                println!("Run 'sqlbuddy --help' for usage information.");
                Ok(())
            }
        }
    }

    fn load_config(&self) -> Result<(AppConfig, PathBuf), CliError> {
        Ok(AppConfig::load(self.config.as_deref())?)
    }

    fn handle_version(&self) -> Result<(), CliError> {
        println!("sqlbuddy version: {}", env!("CARGO_PKG_VERSION"));
        println!("Author: {}", env!("CARGO_PKG_AUTHORS"));
        println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
        Ok(())
    }
}
