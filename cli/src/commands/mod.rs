//! Command implementations for the sqlbuddy CLI

pub mod config;
pub mod input;
pub mod output;
pub mod parse;
pub mod prompt;
pub mod query_tools;
pub mod validate;

pub use self::config::*;
pub use parse::*;
pub use prompt::*;
pub use query_tools::*;
pub use validate::*;
