//! Enrichment stage: per-item detail fan-out with local degradation.

use std::time::Duration;

use futures::future::join_all;
use marquee_contracts::DetailSource;
use marquee_model::{CategorizedItem, DetailResult, PresentationItem};
use tracing::{debug, warn};

use crate::request::bounded;

/// Request details for every item concurrently and merge them in place.
///
/// One request is issued per position, so an id that appears in two
/// categories is fetched twice. A failed, timed out, or backdrop-less detail
/// degrades that item to its poster and never fails the stage. Items left
/// without any image reference are dropped; the rest keep input order.
pub async fn enrich<D>(
    source: &D,
    items: Vec<CategorizedItem>,
    timeout: Option<Duration>,
) -> Vec<PresentationItem>
where
    D: DetailSource + ?Sized,
{
    let requests = items.iter().map(|item| fetch_one(source, item, timeout));
    let details = join_all(requests).await;

    let degraded = details.iter().filter(|d| d.is_none()).count();
    if degraded > 0 {
        debug!(
            target: "carousel::enrich",
            degraded,
            total = items.len(),
            "detail unavailable for some items, using posters"
        );
    }

    items
        .into_iter()
        .zip(details)
        .map(|(item, detail)| PresentationItem::merge(item, detail))
        .filter(|item| {
            if item.has_image() {
                true
            } else {
                warn!(
                    target: "carousel::enrich",
                    id = item.id(),
                    title = item.title(),
                    "dropping item without poster or backdrop"
                );
                false
            }
        })
        .collect()
}

async fn fetch_one<D>(
    source: &D,
    item: &CategorizedItem,
    timeout: Option<Duration>,
) -> Option<DetailResult>
where
    D: DetailSource + ?Sized,
{
    match bounded(timeout, source.fetch_detail(item.id())).await {
        Ok(detail) => Some(detail),
        Err(err) => {
            debug!(
                target: "carousel::enrich",
                id = item.id(),
                error = %err,
                "detail fetch failed"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use marquee_contracts::SourceError;
    use marquee_model::{Category, ListingItem};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl DetailSource for Recording {
        async fn fetch_detail(
            &self,
            id: &str,
        ) -> Result<DetailResult, SourceError> {
            self.calls.lock().push(id.to_owned());
            match id {
                "broken" => Err(SourceError::Unavailable("boom".into())),
                "slow" => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(DetailResult::new(Some("late.jpg".into()), None))
                }
                other => Ok(DetailResult::new(
                    Some(format!("{other}-wide.jpg")),
                    Some(format!("about {other}")),
                )),
            }
        }
    }

    fn item(id: &str, poster: &str) -> CategorizedItem {
        ListingItem::new(id, id.to_uppercase(), "2023", poster)
            .categorize(Category::Tv)
    }

    #[tokio::test]
    async fn failed_detail_degrades_single_item() {
        let source = Recording::default();
        let out = enrich(
            &source,
            vec![item("a", "a.jpg"), item("broken", "b.jpg")],
            None,
        )
        .await;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].backdrop, "a-wide.jpg");
        assert_eq!(out[0].overview.as_deref(), Some("about a"));
        assert_eq!(out[1].backdrop, "b.jpg");
        assert_eq!(out[1].overview, None);
    }

    #[tokio::test]
    async fn duplicate_ids_are_fetched_per_position() {
        let source = Recording::default();
        let out =
            enrich(&source, vec![item("a", "1.jpg"), item("a", "2.jpg")], None)
                .await;

        assert_eq!(out.len(), 2);
        assert_eq!(source.calls.lock().len(), 2);
    }

    #[tokio::test]
    async fn imageless_items_are_dropped_in_order() {
        let source = Recording::default();
        let out = enrich(
            &source,
            vec![
                item("x", "x.jpg"),
                item("broken", ""),
                item("y", "y.jpg"),
            ],
            None,
        )
        .await;

        let ids: Vec<&str> = out.iter().map(|i| i.id()).collect();
        assert_eq!(ids, ["x", "y"]);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_detail_falls_back_to_poster() {
        let source = Recording::default();
        let out = enrich(
            &source,
            vec![item("slow", "poster.jpg")],
            Some(Duration::from_secs(2)),
        )
        .await;

        assert_eq!(out[0].backdrop, "poster.jpg");
    }
}
