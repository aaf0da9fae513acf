use marquee_contracts::SourceError;
use marquee_model::{Category, CategorySpec};
use thiserror::Error;

/// A listing request failed, so the whole aggregation cycle failed.
///
/// Cloneable so the engine can keep the last failure in its state for
/// observers; the source error is flattened into its message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{category} listing ({kind} {primary}/{secondary}) failed: {message}")]
pub struct AggregationFailure {
    pub category: Category,
    pub kind: &'static str,
    pub primary: String,
    pub secondary: String,
    pub message: String,
}

impl AggregationFailure {
    pub fn new(spec: &CategorySpec, err: &SourceError) -> Self {
        Self {
            category: spec.category,
            kind: spec.kind.as_str(),
            primary: spec.primary_filter.clone(),
            secondary: spec.secondary_filter.clone(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregationFailure>;
