//! Paced, fixed-size batches of detail lookups.

use std::time::Duration;

use futures::future::join_all;
use tracing::debug;

use crate::RawRecord;
use crate::client::OmdbClient;

#[derive(Debug, Clone)]
pub struct BatchPolicy {
    /// Lookups issued together per round.
    pub size: usize,
    /// Pause between rounds, to stay under upstream rate limits.
    pub pause: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            size: 5,
            pause: Duration::from_millis(300),
        }
    }
}

impl OmdbClient {
    /// Fetch detail records for `ids`.
    ///
    /// The output has the same length and order as `ids`; a failed lookup is
    /// `None` at its position and does not affect the rest of its group.
    pub async fn fetch_details(&self, ids: &[String]) -> Vec<Option<RawRecord>> {
        let policy = &self.config.batch;
        let mut results = Vec::with_capacity(ids.len());

        for (round, group) in ids.chunks(policy.size.max(1)).enumerate() {
            if round > 0 && !policy.pause.is_zero() {
                tokio::time::sleep(policy.pause).await;
            }
            debug!(round, size = group.len(), "fetching detail batch");
            let fetched = join_all(group.iter().map(|id| self.movie_details(id))).await;
            results.extend(fetched);
        }

        results
    }
}
