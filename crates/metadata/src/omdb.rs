//! OMDb (Open Movie Database) HTTP transport.
//!
//! API reference: https://www.omdbapi.com/

use tracing::debug;

use crate::provider::RecordSource;
use crate::{MetadataError, RawRecord};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Issues GET requests against OMDb with the server-held credential merged
/// into the caller's parameters.
pub struct OmdbSource {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OmdbSource {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: reqwest::Client::new(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Caller parameters with any caller-supplied `apikey` dropped, followed by
/// the credential.
fn with_credential<'a>(
    params: &'a [(String, String)],
    api_key: &'a str,
) -> Vec<(&'a str, &'a str)> {
    let mut all: Vec<(&str, &str)> = vec![("apikey", api_key)];
    all.extend(
        params
            .iter()
            .filter(|(k, _)| k != "apikey")
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );
    all
}

#[async_trait::async_trait]
impl RecordSource for OmdbSource {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn fetch(&self, params: &[(String, String)]) -> Result<RawRecord, MetadataError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| MetadataError::NotConfigured("OMDB_API_KEY is not set".into()))?;

        let query = with_credential(params, api_key);
        debug!(url = %self.base_url, params = ?&query[1..], "OMDb request");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MetadataError::Status(resp.status().as_u16()));
        }

        let value: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| MetadataError::Decode(e.to_string()))?;

        Ok(RawRecord::new(value))
    }
}
