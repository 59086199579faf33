pub mod batch;
pub mod cache;
pub mod client;
pub mod normalize;
pub mod omdb;
pub mod platforms;
pub mod provider;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::{ClientConfig, OmdbClient, RetryPolicy};
pub use provider::{Query, RecordSource};

/// Sentinel the upstream uses for an absent value.
pub const UNAVAILABLE: &str = "N/A";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("parse JSON: {0}")]
    Decode(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

impl MetadataError {
    /// Whether another attempt could succeed. A missing credential cannot.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::NotConfigured(_))
    }
}

/// Unmodified JSON object returned by the movie-data API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(serde_json::Value);

/// One entry of a title search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub imdb_id: String,
    pub title: String,
    pub year: Option<String>,
}

impl RawRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// String value of a top-level field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0[name].as_str()
    }

    /// True when the upstream answered but reported a logical failure
    /// (`"Response": "False"`).
    pub fn is_failure(&self) -> bool {
        self.field("Response") == Some("False")
    }

    pub fn error_message(&self) -> Option<&str> {
        self.field("Error")
    }

    /// Hits of a title search response, skipping entries without an id.
    pub fn search_hits(&self) -> Vec<SearchHit> {
        let hits = self.0["Search"].as_array().cloned().unwrap_or_default();
        hits.iter()
            .filter_map(|h| {
                let imdb_id = h["imdbID"].as_str().filter(|s| !s.is_empty())?;
                Some(SearchHit {
                    imdb_id: imdb_id.to_string(),
                    title: h["Title"].as_str().unwrap_or("Untitled").to_string(),
                    year: h["Year"].as_str().map(|s| s.to_string()),
                })
            })
            .collect()
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_flag_and_error_message() {
        let rec = RawRecord::new(serde_json::json!({
            "Response": "False",
            "Error": "Movie not found!"
        }));
        assert!(rec.is_failure());
        assert_eq!(rec.error_message(), Some("Movie not found!"));

        let ok = RawRecord::new(serde_json::json!({ "Response": "True", "Title": "Heat" }));
        assert!(!ok.is_failure());
        assert_eq!(ok.field("Title"), Some("Heat"));
        assert_eq!(ok.field("Year"), None);
    }

    #[test]
    fn search_hits_skip_entries_without_id() {
        let rec = RawRecord::new(serde_json::json!({
            "Search": [
                { "Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093" },
                { "Title": "Broken" },
                { "Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215" }
            ],
            "totalResults": "3",
            "Response": "True"
        }));
        let hits = rec.search_hits();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].imdb_id, "tt0133093");
        assert_eq!(hits[1].year.as_deref(), Some("2003"));
    }
}
