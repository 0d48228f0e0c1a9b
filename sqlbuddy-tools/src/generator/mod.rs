//! Query generation on top of an external completion provider.
//!
//! The provider is a collaborator: this module only builds prompts, hands them over, and
//! runs the returned text through [`ResponseParser`] and [`QueryValidator`].

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::SqlBuddyError;
use crate::query_validator::QueryValidator;
use crate::response_parser::ResponseParser;
use crate::types::{
    DatabaseKind, GeneratedQuery, ProviderInfo, QueryExplanation, QueryOptimization,
    QueryVariation, VariationOutcome,
};

pub mod prompt;

pub use prompt::{build_explain_prompt, build_generation_prompt, build_optimize_prompt};

/// Text completion backend (OpenAI, Anthropic, a local model, a test double...)
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete a single prompt and return the raw response text
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;

    /// Get provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Get model name
    fn model_name(&self) -> &str;
}

pub struct QueryGenerator {
    provider: Arc<dyn CompletionProvider>,
    parser: ResponseParser,
    validator: QueryValidator,
    db_kind: DatabaseKind,
}

impl QueryGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, db_kind: DatabaseKind) -> Self {
        Self {
            provider,
            parser: ResponseParser::new(),
            validator: QueryValidator::default(),
            db_kind,
        }
    }

    pub fn with_validator(mut self, validator: QueryValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn db_kind(&self) -> DatabaseKind {
        self.db_kind
    }

    pub async fn generate_query(
        &self,
        description: &str,
        schema: &str,
        additional_context: Option<&str>,
        validate: bool,
    ) -> Result<GeneratedQuery, SqlBuddyError> {
        info!("Generating query for: {}", description);

        let prompt = build_generation_prompt(description, schema, self.db_kind, additional_context);
        let response = self.complete(&prompt).await?;
        let parsed = self.parser.parse(&response)?;

        let validation = if validate {
            let report = self.validator.validate(&parsed.query, false);
            if !report.is_valid {
                warn!("Generated query failed validation: {:?}", report.errors);
            } else if report.has_warnings() {
                warn!("Query validation warnings: {:?}", report.warnings);
            }
            Some(report)
        } else {
            None
        };

        Ok(GeneratedQuery { parsed, validation })
    }

    /// Generates `count` independent variations; a failed variation is recorded, not raised
    pub async fn generate_variations(
        &self,
        description: &str,
        schema: &str,
        count: usize,
        additional_context: Option<&str>,
        validate: bool,
    ) -> Vec<QueryVariation> {
        info!("Generating {} query variations for: {}", count, description);

        let mut variations = Vec::with_capacity(count);
        for variation_number in 1..=count {
            let context = format!(
                "{}\n\nGenerate variation #{} with different approach/optimization.",
                additional_context.unwrap_or_default(),
                variation_number
            );

            let outcome = match self
                .generate_query(description, schema, Some(&context), validate)
                .await
            {
                Ok(query) => VariationOutcome::Generated(query),
                Err(e) => {
                    warn!("Variation #{} failed: {}", variation_number, e);
                    VariationOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            variations.push(QueryVariation {
                variation_number,
                outcome,
            });
        }

        variations
    }

    pub async fn explain_query(
        &self,
        query: &str,
        schema: &str,
    ) -> Result<QueryExplanation, SqlBuddyError> {
        info!("Generating query explanation");

        let prompt = build_explain_prompt(query, schema, self.db_kind);
        let analysis = self.complete(&prompt).await?;

        Ok(QueryExplanation {
            query: query.to_string(),
            analysis,
            db_kind: self.db_kind,
        })
    }

    pub async fn optimize_query(
        &self,
        query: &str,
        schema: &str,
    ) -> Result<QueryOptimization, SqlBuddyError> {
        info!("Generating query optimizations");

        let prompt = build_optimize_prompt(query, schema, self.db_kind);
        let details = self.complete(&prompt).await?;

        Ok(QueryOptimization {
            original_query: query.to_string(),
            optimized_query: self.parser.extract_fenced_sql(&details).unwrap_or_default(),
            optimization_details: details,
            db_kind: self.db_kind,
        })
    }

    pub fn provider_info(&self) -> ProviderInfo {
        ProviderInfo {
            provider: self.provider.provider_name().to_string(),
            model: self.provider.model_name().to_string(),
            db_kind: self.db_kind,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, SqlBuddyError> {
        self.provider
            .complete(prompt)
            .await
            .map_err(|e| SqlBuddyError::generation(e.to_string()))
    }
}
