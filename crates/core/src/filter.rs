use serde::Serialize;

use crate::types::{Mood, SortKey};

/// Selector value meaning "no restriction".
pub const ANY: &str = "any";

/// Lower bound on release year used by the streaming-only filter.
///
/// The upstream has no real availability data; recent releases stand in for
/// "probably streaming somewhere". Treat it as a heuristic.
pub const STREAMING_PROXY_MIN_YEAR: u32 = 2000;

pub const GENRE_OPTIONS: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "War",
    "Western",
];

pub const LANGUAGE_OPTIONS: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Russian",
    "Chinese",
    "Japanese",
    "Korean",
    "Hindi",
    "Arabic",
    "Turkish",
    "Dutch",
    "Swedish",
    "Danish",
];

/// Active filter set for one pipeline pass. Built fresh from request input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    pub query: String,
    pub genre: Option<String>,
    pub mood: Option<Mood>,
    pub language: Option<String>,
    pub min_rating: f64,
    pub streaming_only: bool,
    pub sort: SortKey,
    pub favorites_only: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            genre: None,
            mood: None,
            language: None,
            min_rating: 0.0,
            streaming_only: false,
            sort: SortKey::default(),
            favorites_only: false,
        }
    }
}

/// Map a raw selector value to `None` when it is blank or `"any"`.
pub fn selection(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(v) if v.eq_ignore_ascii_case(ANY) => None,
        Some(v) => Some(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_treats_any_and_blank_as_unrestricted() {
        assert_eq!(selection(None), None);
        assert_eq!(selection(Some("")), None);
        assert_eq!(selection(Some("  ")), None);
        assert_eq!(selection(Some("any")), None);
        assert_eq!(selection(Some("Drama")), Some("Drama".to_string()));
    }

    #[test]
    fn default_filters_are_unrestricted() {
        let f = FilterState::default();
        assert!(f.genre.is_none() && f.mood.is_none() && f.language.is_none());
        assert_eq!(f.min_rating, 0.0);
        assert_eq!(f.sort, SortKey::ScoreDesc);
    }
}
