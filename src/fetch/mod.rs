use std::collections::HashMap;
use std::future::Future;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Why raw report text could not be obtained for a station (or batch of stations)
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {station} failed: {source}")]
    Request {
        station: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("upstream returned HTTP {status} for {station}")]
    Status { station: String, status: u16 },
}

/// Fetch every station concurrently, one task per station.
///
/// Each task's outcome is kept under its station id. A task that panics is
/// logged and left out of the map, which downstream treats the same as a
/// failed fetch.
pub async fn fetch_all<F, Fut>(ids: Vec<String>, fetch: F) -> HashMap<String, Result<String, FetchError>>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, FetchError>> + Send + 'static,
{
    let mut workers = JoinSet::new();
    for id in ids {
        let fut = fetch(id.clone());
        workers.spawn(async move { (id, fut.await) });
    }

    let mut results = HashMap::new();
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((id, result)) => {
                match &result {
                    Ok(raw) => debug!("Fetched {} bytes for {}", raw.len(), id),
                    Err(e) => warn!("Fetch failed: {}", e),
                }
                results.insert(id, result);
            }
            Err(e) => warn!("Fetch task did not complete: {}", e),
        }
    }

    let failed = results.values().filter(|r| r.is_err()).count();
    info!("Fetched {} stations ({} failed)", results.len(), failed);
    results
}
