//! Raw OMDb record -> [`NormalizedMovie`].
//!
//! Absent fields, empty strings and the `"N/A"` sentinel are all treated as
//! missing and replaced by defaults; a single bad field never drops the
//! record.

use std::sync::LazyLock;

use cinevibe_core::{Mood, NormalizedMovie};
use regex::Regex;

use crate::{RawRecord, UNAVAILABLE, platforms};

pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_GENRE: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";
const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/400x600/020617/6366f1?text=";
const MAX_TAGS: usize = 5;

/// Ordered mood rules: if any keyword occurs in the lowercased genre text,
/// the moods are appended. Several rules may fire.
pub const MOOD_RULES: &[(&[&str], &[Mood])] = &[
    (&["comedy"], &[Mood::FeelGood]),
    (&["family", "animation"], &[Mood::Family]),
    (&["horror", "thriller"], &[Mood::Dark, Mood::Intense]),
    (&["drama"], &[Mood::Thoughtful]),
    (&["sci-fi", "adventure"], &[Mood::Intense, Mood::Thoughtful]),
    (&["romance"], &[Mood::FeelGood]),
];

pub const DEFAULT_MOOD: Mood = Mood::Thoughtful;

static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

static RE_LEADING_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d*)?|\.\d+)").unwrap());

/// Build a movie from one record. `None` for a missing record or one that
/// reports a logical failure.
pub fn normalize(record: Option<&RawRecord>) -> Option<NormalizedMovie> {
    let record = record?;
    if record.is_failure() {
        return None;
    }

    let title = present(record, "Title").unwrap_or(UNTITLED).to_string();
    let genre_text = present(record, "Genre").unwrap_or("");
    let genres = split_list(genre_text);
    let actors: Vec<String> = split_list(present(record, "Actors").unwrap_or(""))
        .into_iter()
        .take(2)
        .collect();
    let director = present(record, "Director")
        .and_then(|d| d.split(',').next())
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let tags: Vec<String> = director
        .map(str::to_string)
        .into_iter()
        .chain(actors)
        .chain(genres.iter().take(2).cloned())
        .take(MAX_TAGS)
        .collect();

    let poster = match present(record, "Poster") {
        Some(url) => url.to_string(),
        None => placeholder_poster(present(record, "Title")),
    };

    Some(NormalizedMovie {
        year: parse_year(present(record, "Year").unwrap_or("")),
        genre: genres
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
        runtime: parse_runtime(present(record, "Runtime").unwrap_or("")),
        moods: derive_moods(genre_text),
        rating: parse_rating(present(record, "imdbRating").unwrap_or("")),
        tags,
        streaming: true,
        poster,
        description: present(record, "Plot").unwrap_or(NO_DESCRIPTION).to_string(),
        imdb: present(record, "imdbID").map(str::to_string),
        where_to_watch: resolve_where(present(record, "Website"), &title),
        languages: split_list(present(record, "Language").unwrap_or("")),
        score: 0.0,
        title,
    })
}

/// Evaluate [`MOOD_RULES`] against the full genre text.
pub fn derive_moods(genre_text: &str) -> Vec<Mood> {
    let lower = genre_text.to_lowercase();
    let moods: Vec<Mood> = MOOD_RULES
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .flat_map(|(_, moods)| moods.iter().copied())
        .collect();

    if moods.is_empty() {
        vec![DEFAULT_MOOD]
    } else {
        moods
    }
}

/// Website link, then the static title table, then "Other".
pub fn resolve_where(website: Option<&str>, title: &str) -> String {
    website
        .or_else(|| platforms::platform_for(title))
        .unwrap_or(platforms::OTHER)
        .to_string()
}

fn present<'a>(record: &'a RawRecord, name: &str) -> Option<&'a str> {
    record
        .field(name)
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != UNAVAILABLE)
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// Leading digits of the first four characters ("2010–2012" -> 2010).
fn parse_year(text: &str) -> u32 {
    text.chars()
        .take(4)
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

fn parse_runtime(text: &str) -> u32 {
    RE_DIGITS
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn parse_rating(text: &str) -> f64 {
    RE_LEADING_FLOAT
        .captures(text)
        .and_then(|c| c[1].parse::<f64>().ok())
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(0.0, 10.0))
        .unwrap_or(0.0)
}

fn placeholder_poster(title: Option<&str>) -> String {
    match title {
        Some(t) => format!("{POSTER_PLACEHOLDER}{}", urlencoding::encode(t)),
        None => format!("{POSTER_PLACEHOLDER}No+Image"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(value: serde_json::Value) -> RawRecord {
        RawRecord::new(value)
    }

    #[test]
    fn inception_scenario() {
        let r = rec(json!({
            "Title": "Inception",
            "Year": "2010",
            "Genre": "Action, Sci-Fi",
            "imdbRating": "8.8",
            "Runtime": "148 min",
            "Website": "N/A",
            "Response": "True"
        }));
        let m = normalize(Some(&r)).unwrap();
        assert_eq!(m.title, "Inception");
        assert_eq!(m.year, 2010);
        assert_eq!(m.genre, "Action");
        assert!(m.has_mood(Mood::Intense));
        assert!(m.has_mood(Mood::Thoughtful));
        assert_eq!(m.runtime, 148);
        assert!((m.rating - 8.8).abs() < 1e-9);
        assert_eq!(m.where_to_watch, "Netflix");
        assert!(m.streaming);
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn missing_or_failed_record_is_none() {
        assert!(normalize(None).is_none());
        let failed = rec(json!({ "Response": "False", "Error": "Incorrect IMDb ID." }));
        assert!(normalize(Some(&failed)).is_none());
    }

    #[test]
    fn empty_record_gets_defaults() {
        let m = normalize(Some(&rec(json!({})))).unwrap();
        assert_eq!(m.title, UNTITLED);
        assert_eq!(m.year, 0);
        assert_eq!(m.genre, UNKNOWN_GENRE);
        assert_eq!(m.runtime, 0);
        assert_eq!(m.moods, vec![Mood::Thoughtful]);
        assert_eq!(m.rating, 0.0);
        assert!(m.tags.is_empty());
        assert!(m.languages.is_empty());
        assert_eq!(m.description, NO_DESCRIPTION);
        assert_eq!(m.imdb, None);
        assert_eq!(m.where_to_watch, "Other");
        assert!(m.poster.ends_with("text=No+Image"));
    }

    #[test]
    fn sentinel_values_count_as_missing() {
        let m = normalize(Some(&rec(json!({
            "Title": "Obscure Film",
            "Year": "N/A",
            "Genre": "N/A",
            "imdbRating": "N/A",
            "Runtime": "N/A",
            "Poster": "N/A",
            "Plot": "N/A",
            "Director": "N/A",
            "imdbID": "tt0000001"
        }))))
        .unwrap();
        assert_eq!(m.year, 0);
        assert_eq!(m.genre, UNKNOWN_GENRE);
        assert_eq!(m.rating, 0.0);
        assert_eq!(m.description, NO_DESCRIPTION);
        assert!(m.tags.is_empty());
        assert_eq!(
            m.poster,
            "https://via.placeholder.com/400x600/020617/6366f1?text=Obscure%20Film"
        );
        assert_eq!(m.imdb.as_deref(), Some("tt0000001"));
    }

    #[test]
    fn moods_accumulate_in_rule_order() {
        assert_eq!(
            derive_moods("Comedy, Drama, Romance"),
            vec![Mood::FeelGood, Mood::Thoughtful, Mood::FeelGood]
        );
        assert_eq!(
            derive_moods("Horror, Thriller"),
            vec![Mood::Dark, Mood::Intense]
        );
        assert_eq!(
            derive_moods("Animation, Adventure, Family"),
            vec![Mood::Family, Mood::Intense, Mood::Thoughtful]
        );
        assert_eq!(derive_moods("Western"), vec![Mood::Thoughtful]);
        assert_eq!(derive_moods(""), vec![Mood::Thoughtful]);
    }

    #[test]
    fn mood_match_is_substring_and_case_insensitive() {
        // "Dramedy" does not contain "drama", "SCI-FI" does contain "sci-fi".
        assert_eq!(derive_moods("Dramedy"), vec![Mood::Thoughtful]);
        assert_eq!(
            derive_moods("SCI-FI"),
            vec![Mood::Intense, Mood::Thoughtful]
        );
        assert_eq!(derive_moods("Romantic Comedy"), vec![Mood::FeelGood]);
    }

    #[test]
    fn tags_are_director_actors_genres_capped_at_five() {
        let m = normalize(Some(&rec(json!({
            "Title": "The Matrix",
            "Director": "Lana Wachowski, Lilly Wachowski",
            "Actors": "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
            "Genre": "Action, Sci-Fi, Thriller"
        }))))
        .unwrap();
        assert_eq!(
            m.tags,
            vec![
                "Lana Wachowski",
                "Keanu Reeves",
                "Laurence Fishburne",
                "Action",
                "Sci-Fi"
            ]
        );
        assert_eq!(m.where_to_watch, "HBO Max");
    }

    #[test]
    fn tags_without_director() {
        let m = normalize(Some(&rec(json!({
            "Actors": " , Solo Actor ,",
            "Genre": "Drama"
        }))))
        .unwrap();
        assert_eq!(m.tags, vec!["Solo Actor", "Drama"]);
    }

    #[test]
    fn lists_are_trimmed_and_cleaned() {
        let m = normalize(Some(&rec(json!({
            "Language": " English, , French ,Japanese",
            "Genre": " Drama ,, Crime"
        }))))
        .unwrap();
        assert_eq!(m.languages, vec!["English", "French", "Japanese"]);
        assert_eq!(m.genre, "Drama");
    }

    #[test]
    fn website_wins_over_lookup_table() {
        let m = normalize(Some(&rec(json!({
            "Title": "Inception",
            "Website": "https://example.com/inception"
        }))))
        .unwrap();
        assert_eq!(m.where_to_watch, "https://example.com/inception");
        assert!(m.where_is_link());
    }

    #[test]
    fn numeric_parsing_edge_cases() {
        assert_eq!(parse_year("2010–2012"), 2010);
        assert_eq!(parse_year("19"), 19);
        assert_eq!(parse_year("abcd"), 0);
        assert_eq!(parse_runtime("1 h 30 min"), 1);
        assert_eq!(parse_runtime("90 min"), 90);
        assert_eq!(parse_runtime("unknown"), 0);
        assert!((parse_rating("7.5/10") - 7.5).abs() < 1e-9);
        assert_eq!(parse_rating("42"), 10.0);
        assert_eq!(parse_rating("-3"), 0.0);
        assert_eq!(parse_rating(""), 0.0);
    }

    #[test]
    fn blank_title_falls_back() {
        let m = normalize(Some(&rec(json!({ "Title": "   " })))).unwrap();
        assert_eq!(m.title, UNTITLED);
    }
}
