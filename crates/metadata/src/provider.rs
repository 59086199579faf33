use crate::{MetadataError, RawRecord};

/// Transport that answers one parameterized request against the movie-data
/// API. Logical failures (`Response: "False"`) come back as `Ok`; only
/// transport problems are errors.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, params: &[(String, String)]) -> Result<RawRecord, MetadataError>;
}

/// A cacheable upstream query. Also the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// Title search restricted to movies.
    Search { title: String, page: u32 },
    /// Full detail lookup by IMDb id.
    Detail { imdb_id: String },
}

impl Query {
    pub fn search(title: impl Into<String>, page: u32) -> Self {
        Self::Search {
            title: title.into(),
            page,
        }
    }

    pub fn detail(imdb_id: impl Into<String>) -> Self {
        Self::Detail {
            imdb_id: imdb_id.into(),
        }
    }

    /// Request parameters, without the credential.
    pub fn params(&self) -> Vec<(String, String)> {
        match self {
            Self::Search { title, page } => vec![
                ("s".into(), title.clone()),
                ("type".into(), "movie".into()),
                ("page".into(), page.to_string()),
            ],
            Self::Detail { imdb_id } => vec![
                ("i".into(), imdb_id.clone()),
                ("plot".into(), "full".into()),
            ],
        }
    }
}
