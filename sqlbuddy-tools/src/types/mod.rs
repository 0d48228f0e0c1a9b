pub mod generation;
pub mod validation;

pub use generation::{
    DatabaseKind, GeneratedQuery, ParsedGeneration, ProviderInfo, QueryExplanation,
    QueryOptimization, QueryVariation, VariationOutcome,
};
pub use validation::ValidationReport;
