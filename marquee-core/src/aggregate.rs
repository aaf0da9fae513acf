//! Aggregation stage: one listing request per spec, all in flight at once.

use std::time::Duration;

use futures::future::try_join_all;
use marquee_contracts::ListingSource;
use marquee_model::{CategorizedItem, CategorySpec};
use tracing::debug;

use crate::error::{AggregationFailure, Result};
use crate::request::bounded;

/// Fetch every spec concurrently and concatenate the results in spec order.
///
/// Any single failed listing fails the whole stage; the navigation strip
/// assumes every configured category is represented. Items are tagged with
/// their spec's category and never deduplicated across categories.
pub async fn aggregate<L>(
    source: &L,
    specs: &[CategorySpec],
    timeout: Option<Duration>,
) -> Result<Vec<CategorizedItem>>
where
    L: ListingSource + ?Sized,
{
    let requests = specs.iter().map(|spec| async move {
        let items = bounded(timeout, source.fetch_listing(spec))
            .await
            .map_err(|err| AggregationFailure::new(spec, &err))?;

        debug!(
            target: "carousel::cycle",
            category = %spec.category,
            count = items.len(),
            "listing fetched"
        );

        Ok::<_, AggregationFailure>(
            items
                .into_iter()
                .map(|item| item.categorize(spec.category))
                .collect::<Vec<_>>(),
        )
    });

    // try_join_all keeps input order regardless of completion order.
    let blocks = try_join_all(requests).await?;
    Ok(blocks.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use marquee_contracts::SourceError;
    use marquee_model::{Category, ListingItem, ListingKind};

    struct ByCategory;

    #[async_trait]
    impl ListingSource for ByCategory {
        async fn fetch_listing(
            &self,
            spec: &CategorySpec,
        ) -> std::result::Result<Vec<ListingItem>, SourceError> {
            match spec.category {
                Category::Show => Err(SourceError::Status(502)),
                other => Ok((0..spec.page_limit)
                    .map(|i| {
                        ListingItem::new(
                            format!("{other}-{i}"),
                            format!("{other} {i}"),
                            "2024",
                            format!("{other}-{i}.jpg"),
                        )
                    })
                    .collect()),
            }
        }
    }

    fn spec(category: Category, limit: u32) -> CategorySpec {
        CategorySpec::new(category, ListingKind::Tv, "热门", "热门", limit)
    }

    #[tokio::test]
    async fn concatenates_in_spec_order() {
        let specs = [spec(Category::Anime, 1), spec(Category::Movie, 2)];
        let items = aggregate(&ByCategory, &specs, None)
            .await
            .expect("aggregation succeeds");

        let ids: Vec<&str> = items.iter().map(|i| i.id()).collect();
        assert_eq!(ids, ["anime-0", "movie-0", "movie-1"]);
        assert_eq!(items[0].category, Category::Anime);
        assert_eq!(items[2].category, Category::Movie);
    }

    #[tokio::test]
    async fn one_failed_listing_fails_the_stage() {
        let specs = [spec(Category::Movie, 2), spec(Category::Show, 2)];
        let failure = aggregate(&ByCategory, &specs, None)
            .await
            .expect_err("show listing fails");

        assert_eq!(failure.category, Category::Show);
        assert!(failure.message.contains("502"));
    }

    #[tokio::test]
    async fn empty_configuration_yields_empty_set() {
        let items = aggregate(&ByCategory, &[], None)
            .await
            .expect("nothing to fetch");
        assert!(items.is_empty());
    }
}
