//! Card and details view models served to the front end.

use cinevibe_core::NormalizedMovie;
use cinevibe_metadata::platforms;
use serde::Serialize;

const CARD_TAGS: usize = 3;
const IMDB_TITLE_URL: &str = "https://www.imdb.com/title/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Low,
    Medium,
    High,
}

impl ScoreTier {
    pub fn for_score(score: f64) -> Self {
        if score < 55.0 {
            Self::Low
        } else if score < 75.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBadge {
    pub label: String,
    pub rating: String,
    pub tier: ScoreTier,
}

impl ScoreBadge {
    pub fn new(score: f64, rating: f64) -> Self {
        Self {
            label: format!("{}% match", score.round() as i64),
            rating: format_rating(rating),
            tier: ScoreTier::for_score(score),
        }
    }
}

/// Where-to-watch rendering: a direct link, or a platform with its logo.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WhereBadge {
    Link { url: String },
    Platform { name: String, logo: &'static str },
}

impl WhereBadge {
    pub fn for_movie(movie: &NormalizedMovie) -> Self {
        if movie.where_is_link() {
            Self::Link {
                url: movie.where_to_watch.clone(),
            }
        } else {
            Self::Platform {
                name: movie.where_to_watch.clone(),
                logo: platforms::logo_for(&movie.where_to_watch),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub title: String,
    pub year: u32,
    pub genre: String,
    pub mood: String,
    pub language: Option<String>,
    pub tags: Vec<String>,
    pub poster: String,
    pub description: String,
    pub imdb: Option<String>,
    #[serde(rename = "where")]
    pub where_badge: WhereBadge,
    pub streaming: bool,
    pub score: ScoreBadge,
    pub favorite: bool,
}

impl MovieCard {
    pub fn new(movie: &NormalizedMovie, favorite: bool) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year,
            genre: movie.genre.clone(),
            mood: movie
                .moods
                .first()
                .map(|m| m.label())
                .unwrap_or_else(|| "Unknown".to_string()),
            language: movie.languages.first().cloned(),
            tags: movie.tags.iter().take(CARD_TAGS).cloned().collect(),
            poster: movie.poster.clone(),
            description: movie.description.clone(),
            imdb: movie.imdb.clone(),
            where_badge: WhereBadge::for_movie(movie),
            streaming: movie.streaming,
            score: ScoreBadge::new(movie.score, movie.rating),
            favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsView {
    pub title: String,
    pub poster: String,
    pub meta: String,
    pub badges: Vec<String>,
    #[serde(rename = "where")]
    pub where_badge: WhereBadge,
    pub description: String,
    pub imdb_url: Option<String>,
    pub favorite: bool,
}

impl DetailsView {
    pub fn new(movie: &NormalizedMovie, favorite: bool) -> Self {
        Self {
            title: movie.title.clone(),
            poster: movie.poster.clone(),
            meta: meta_line(movie),
            badges: movie.tags.clone(),
            where_badge: WhereBadge::for_movie(movie),
            description: movie.description.clone(),
            imdb_url: movie.imdb.as_ref().map(|id| format!("{IMDB_TITLE_URL}{id}")),
            favorite,
        }
    }
}

/// "2010 • Action • 148 min • 8.8 ⭐ • English", skipping empty parts.
pub fn meta_line(movie: &NormalizedMovie) -> String {
    let parts = [
        (movie.year > 0).then(|| movie.year.to_string()),
        Some(movie.genre.clone()),
        (movie.runtime > 0).then(|| format!("{} min", movie.runtime)),
        Some(if movie.rating > 0.0 {
            format!("{:.1} ⭐", movie.rating)
        } else {
            "N/A".to_string()
        }),
        movie.languages.first().cloned(),
    ];
    parts
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

fn format_rating(rating: f64) -> String {
    if rating.is_finite() {
        format!("{rating:.1}")
    } else {
        "N/A".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::movie;
    use cinevibe_core::Mood;

    #[test]
    fn score_tiers() {
        assert_eq!(ScoreTier::for_score(50.0), ScoreTier::Low);
        assert_eq!(ScoreTier::for_score(55.0), ScoreTier::Medium);
        assert_eq!(ScoreTier::for_score(74.9), ScoreTier::Medium);
        assert_eq!(ScoreTier::for_score(75.0), ScoreTier::High);
    }

    #[test]
    fn badge_rounds_score_and_formats_rating() {
        let b = ScoreBadge::new(62.5, 8.26);
        assert_eq!(b.label, "63% match");
        assert_eq!(b.rating, "8.3");
        assert_eq!(ScoreBadge::new(50.0, f64::NAN).rating, "N/A");
    }

    #[test]
    fn card_picks_first_mood_language_and_three_tags() {
        let mut m = movie("Amélie", "Comedy", 8.3, 2001);
        m.moods = vec![Mood::FeelGood, Mood::Thoughtful];
        m.languages = vec!["French".into(), "Russian".into()];
        m.tags = vec!["a", "b", "c", "d", "e"].into_iter().map(String::from).collect();
        let card = MovieCard::new(&m, true);
        assert_eq!(card.mood, "feel good");
        assert_eq!(card.language.as_deref(), Some("French"));
        assert_eq!(card.tags, vec!["a", "b", "c"]);
        assert!(card.favorite);
    }

    #[test]
    fn where_badge_link_or_platform() {
        let mut m = movie("Inception", "Action", 8.8, 2010);
        m.where_to_watch = "Netflix".into();
        match WhereBadge::for_movie(&m) {
            WhereBadge::Platform { name, logo } => {
                assert_eq!(name, "Netflix");
                assert!(logo.contains("Netflix"));
            }
            other => panic!("expected platform, got {other:?}"),
        }

        m.where_to_watch = "https://example.com".into();
        assert_eq!(
            WhereBadge::for_movie(&m),
            WhereBadge::Link {
                url: "https://example.com".into()
            }
        );

        let json = serde_json::to_value(WhereBadge::for_movie(&m)).unwrap();
        assert_eq!(json["kind"], "link");
    }

    #[test]
    fn details_meta_skips_empty_parts() {
        let mut m = movie("Inception", "Action", 8.8, 2010);
        m.runtime = 148;
        m.imdb = Some("tt1375666".into());
        let d = DetailsView::new(&m, false);
        assert_eq!(d.meta, "2010 • Action • 148 min • 8.8 ⭐ • English");
        assert_eq!(
            d.imdb_url.as_deref(),
            Some("https://www.imdb.com/title/tt1375666")
        );

        let mut bare = movie("Unknown", "Unknown", 0.0, 0);
        bare.runtime = 0;
        bare.languages.clear();
        assert_eq!(meta_line(&bare), "Unknown • N/A");
        assert!(DetailsView::new(&bare, false).imdb_url.is_none());
    }
}
