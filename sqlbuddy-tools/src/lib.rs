pub mod error;
pub mod generator;
pub mod query_validator;
pub mod response_parser;
pub mod types;

pub use error::SqlBuddyError;
pub use generator::{
    build_explain_prompt, build_generation_prompt, build_optimize_prompt, CompletionProvider,
    QueryGenerator,
};
pub use query_validator::{
    extract_tables_from_query, is_safe_query, sanitize_query, validate_query, PatternRule,
    PatternSet, PatternSpec, QueryValidator,
};
pub use response_parser::{extract_sql_block, parse_response, ResponseParser};
pub use types::*;
