use std::future::Future;
use std::time::Duration;

use marquee_contracts::SourceError;

/// Await a source request, optionally bounded by `limit`.
pub(crate) async fn bounded<T, F>(
    limit: Option<Duration>,
    request: F,
) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| SourceError::Timeout(limit))?,
        None => request.await,
    }
}
