use serde::{Deserialize, Serialize};

use crate::types::Mood;

/// Canonical movie entity produced from one upstream record.
///
/// Every field except `score` is fixed at normalization time. `score` is
/// overwritten on each filter pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMovie {
    pub title: String,
    pub year: u32,
    pub genre: String,
    pub runtime: u32,
    pub moods: Vec<Mood>,
    pub rating: f64,
    pub tags: Vec<String>,
    /// Always true: the upstream carries no availability data, so this is a
    /// placeholder rather than a verified signal.
    pub streaming: bool,
    pub poster: String,
    pub description: String,
    pub imdb: Option<String>,
    #[serde(rename = "where")]
    pub where_to_watch: String,
    pub languages: Vec<String>,
    pub score: f64,
}

impl NormalizedMovie {
    pub fn has_mood(&self, mood: Mood) -> bool {
        self.moods.contains(&mood)
    }

    pub fn speaks(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// Whether the where-to-watch value is a direct link rather than a
    /// platform name.
    pub fn where_is_link(&self) -> bool {
        self.where_to_watch.starts_with("http://") || self.where_to_watch.starts_with("https://")
    }
}
