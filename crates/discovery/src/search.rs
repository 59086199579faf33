//! Search orchestration: title search, detail batch, normalize, pipeline.

use std::collections::BTreeSet;

use cinevibe_core::{FilterState, NormalizedMovie};
use cinevibe_metadata::OmdbClient;
use cinevibe_metadata::normalize::normalize;
use futures::future::join_all;
use tracing::{debug, info};

use crate::page::summary;
use crate::pipeline;

/// Search hits whose details are fetched.
pub const SEARCH_RESULT_LIMIT: usize = 12;

/// Titles shown before the user has searched for anything.
pub const SEED_TITLES: &[&str] = &[
    "The Shawshank Redemption",
    "The Godfather",
    "The Dark Knight",
    "Pulp Fiction",
    "The Lord of the Rings: The Return of the King",
    "Fight Club",
    "Forrest Gump",
    "Inception",
    "Interstellar",
    "Parasite",
];

pub const EMPTY_QUERY_MESSAGE: &str = "Type a movie title to search";
pub const NO_VALID_MOVIES_MESSAGE: &str = "No valid movies found";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank query; nothing was requested upstream.
    EmptyQuery,
    /// The title search returned no hits.
    NoMatches { query: String },
    /// Hits were found but none of their details normalized.
    NoValidMovies,
    /// Filtered, ordered movies (possibly empty after filtering).
    Movies(Vec<NormalizedMovie>),
}

impl SearchOutcome {
    pub fn movies(&self) -> &[NormalizedMovie] {
        match self {
            Self::Movies(movies) => movies,
            _ => &[],
        }
    }

    pub fn into_movies(self) -> Vec<NormalizedMovie> {
        match self {
            Self::Movies(movies) => movies,
            _ => Vec::new(),
        }
    }

    /// Status line for this outcome with `visible` results shown.
    pub fn message(&self, visible: usize) -> String {
        match self {
            Self::EmptyQuery => EMPTY_QUERY_MESSAGE.to_string(),
            Self::NoMatches { query } => format!("No movies found for \"{query}\""),
            Self::NoValidMovies => NO_VALID_MOVIES_MESSAGE.to_string(),
            Self::Movies(movies) => summary(movies.len(), visible),
        }
    }
}

pub struct Discovery {
    client: OmdbClient,
}

impl Discovery {
    pub fn new(client: OmdbClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &OmdbClient {
        &self.client
    }

    /// Run a full search for `filters.query`.
    pub async fn search(
        &self,
        filters: &FilterState,
        favorites: &BTreeSet<String>,
    ) -> SearchOutcome {
        let query = filters.query.trim();
        if query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }

        let hits = self
            .client
            .search_by_title(query, 1)
            .await
            .map(|r| r.search_hits())
            .unwrap_or_default();
        if hits.is_empty() {
            info!(query, "no search hits");
            return SearchOutcome::NoMatches {
                query: query.to_string(),
            };
        }

        let ids: Vec<String> = hits
            .into_iter()
            .take(SEARCH_RESULT_LIMIT)
            .map(|h| h.imdb_id)
            .collect();
        let details = self.client.fetch_details(&ids).await;
        let movies: Vec<NormalizedMovie> =
            details.iter().filter_map(|d| normalize(d.as_ref())).collect();

        debug!(query, hits = ids.len(), normalized = movies.len(), "search fetched");
        if movies.is_empty() {
            return SearchOutcome::NoValidMovies;
        }

        SearchOutcome::Movies(pipeline::run(movies, filters, favorites))
    }

    /// Load [`SEED_TITLES`] concurrently, score them under `filters`, and
    /// order by rating then score, both descending. Titles that fail to
    /// resolve are skipped.
    pub async fn top_rated(&self, filters: &FilterState) -> Vec<NormalizedMovie> {
        let loaded = join_all(SEED_TITLES.iter().map(|title| self.first_hit(title))).await;

        let mut movies: Vec<NormalizedMovie> = loaded
            .into_iter()
            .flatten()
            .map(|mut m| {
                m.score = crate::score::score(&m, filters);
                m
            })
            .collect();

        movies.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| b.score.total_cmp(&a.score))
        });
        movies
    }

    /// Details for one IMDb id, normalized.
    pub async fn details(&self, imdb_id: &str) -> Option<NormalizedMovie> {
        let record = self.client.movie_details(imdb_id).await;
        normalize(record.as_ref())
    }

    async fn first_hit(&self, title: &str) -> Option<NormalizedMovie> {
        let found = self.client.search_by_title(title, 1).await?;
        let hit = found.search_hits().into_iter().next()?;
        self.details(&hit.imdb_id).await
    }
}
