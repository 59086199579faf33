//! Retrying, caching client over a [`RecordSource`].

use std::sync::Arc;
use std::time::Duration;

use tokio_retry::RetryIf;
use tracing::{debug, warn};

use crate::batch::BatchPolicy;
use crate::cache::{CachePolicy, QueryCache};
use crate::provider::{Query, RecordSource};
use crate::{MetadataError, RawRecord};

/// Per-attempt timeout plus linear backoff between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub timeout: Duration,
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Delay before retry `n` is `n * backoff_step`.
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 3,
            backoff_step: Duration::from_millis(1500),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.backoff_step * retry
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub retry: RetryPolicy,
    pub batch: BatchPolicy,
    pub cache: CachePolicy,
}

pub struct OmdbClient {
    source: Arc<dyn RecordSource>,
    pub(crate) config: ClientConfig,
    cache: QueryCache,
}

impl OmdbClient {
    pub fn new(source: Arc<dyn RecordSource>, config: ClientConfig) -> Self {
        let cache = QueryCache::new(config.cache.clone());
        Self {
            source,
            config,
            cache,
        }
    }

    pub fn source(&self) -> &Arc<dyn RecordSource> {
        &self.source
    }

    /// Fetch a record for `query`, served from cache when possible.
    ///
    /// `None` means "no data": either the upstream reported no match or
    /// every attempt failed.
    pub async fn fetch_records(&self, query: &Query) -> Option<RawRecord> {
        self.cache
            .get_or_fetch(query, || self.fetch_with_retry(query.params()))
            .await
    }

    pub async fn search_by_title(&self, title: &str, page: u32) -> Option<RawRecord> {
        self.fetch_records(&Query::search(title, page)).await
    }

    pub async fn movie_details(&self, imdb_id: &str) -> Option<RawRecord> {
        self.fetch_records(&Query::detail(imdb_id)).await
    }

    /// Uncached fetch with timeout and bounded retry.
    ///
    /// Transport errors and timeouts are retried with linear backoff. A
    /// record reporting `Response: "False"` ends the attempts at once.
    pub async fn fetch_with_retry(&self, params: Vec<(String, String)>) -> Option<RawRecord> {
        let policy = &self.config.retry;
        let params = &params;
        let source = &self.source;
        let strategy = (1..=policy.max_retries).map(|n| policy.delay_for(n));

        let mut attempt = 0u32;
        let action = || {
            attempt += 1;
            let attempt = attempt;
            async move {
                let result = tokio::time::timeout(policy.timeout, source.fetch(params))
                    .await
                    .unwrap_or(Err(MetadataError::Timeout(policy.timeout)));

                match result {
                    Ok(record) if record.is_failure() => {
                        warn!(
                            source = source.name(),
                            error = record.error_message().unwrap_or("unknown"),
                            "upstream reported no result"
                        );
                        Ok(None)
                    }
                    Ok(record) => {
                        debug!(source = source.name(), attempt, "fetch succeeded");
                        Ok(Some(record))
                    }
                    Err(e) => {
                        warn!(source = source.name(), attempt, error = %e, "fetch failed");
                        Err(e)
                    }
                }
            }
        };

        match RetryIf::spawn(strategy, action, MetadataError::is_transient).await {
            Ok(record) => record,
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "giving up");
                None
            }
        }
    }
}
