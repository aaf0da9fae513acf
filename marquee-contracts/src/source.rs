use async_trait::async_trait;
use marquee_model::{CategorySpec, DetailResult, ListingItem};

use crate::error::SourceError;

/// Remote listing source: one bounded, ordered page of items per category
/// spec.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listing(
        &self,
        spec: &CategorySpec,
    ) -> Result<Vec<ListingItem>, SourceError>;
}

/// Remote detail source: enrichment for a single item id. Implementations
/// may fail or return partial data independently per item.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn fetch_detail(&self, id: &str)
    -> Result<DetailResult, SourceError>;
}
