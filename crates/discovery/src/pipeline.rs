//! Score, filter and order a result set.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use cinevibe_core::filter::STREAMING_PROXY_MIN_YEAR;
use cinevibe_core::{FilterState, NormalizedMovie, SortKey};

use crate::score::score;

/// Rescore every movie, drop the ones that fail a predicate, and order the
/// rest by `filters.sort`. Returns the full sequence; paging is the caller's.
pub fn run(
    movies: Vec<NormalizedMovie>,
    filters: &FilterState,
    favorites: &BTreeSet<String>,
) -> Vec<NormalizedMovie> {
    let mut kept: Vec<NormalizedMovie> = movies
        .into_iter()
        .map(|mut m| {
            m.score = score(&m, filters);
            m
        })
        .filter(|m| m.rating >= filters.min_rating)
        .filter(|m| passes(m, filters, favorites))
        .collect();

    sort(&mut kept, filters.sort);
    kept
}

/// Inclusion predicates other than the rating threshold.
pub fn passes(movie: &NormalizedMovie, filters: &FilterState, favorites: &BTreeSet<String>) -> bool {
    if let Some(genre) = &filters.genre {
        if movie.genre != *genre {
            return false;
        }
    }
    if let Some(mood) = filters.mood {
        if !movie.has_mood(mood) {
            return false;
        }
    }
    if let Some(language) = &filters.language {
        if !movie.speaks(language) {
            return false;
        }
    }
    if filters.favorites_only && !favorites.contains(&movie.title) {
        return false;
    }
    if filters.streaming_only && movie.year < STREAMING_PROXY_MIN_YEAR {
        return false;
    }
    true
}

/// Stable sort by `key`.
pub fn sort(movies: &mut [NormalizedMovie], key: SortKey) {
    movies.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &NormalizedMovie, b: &NormalizedMovie, key: SortKey) -> Ordering {
    match key {
        SortKey::ScoreDesc => b
            .score
            .total_cmp(&a.score)
            .then_with(|| b.rating.total_cmp(&a.rating)),
        SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
        SortKey::YearDesc => b.year.cmp(&a.year),
        SortKey::YearAsc => a.year.cmp(&b.year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::movie;
    use cinevibe_core::Mood;

    fn titles(movies: &[NormalizedMovie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    fn sample() -> Vec<NormalizedMovie> {
        let mut a = movie("Alien", "Horror", 8.5, 1979);
        a.moods = vec![Mood::Dark, Mood::Intense];
        let mut b = movie("Amélie", "Comedy", 8.3, 2001);
        b.moods = vec![Mood::FeelGood, Mood::FeelGood];
        b.languages = vec!["French".into(), "Russian".into()];
        let c = movie("Arrival", "Drama", 7.9, 2016);
        let mut d = movie("Up", "Animation", 8.3, 2009);
        d.moods = vec![Mood::Family, Mood::Intense, Mood::Thoughtful];
        let e = movie("Cats", "Comedy", 2.8, 2019);
        vec![a, b, c, d, e]
    }

    #[test]
    fn scores_are_recomputed_every_pass() {
        let mut movies = sample();
        for m in &mut movies {
            m.score = 999.0;
        }
        let out = run(movies, &FilterState::default(), &BTreeSet::new());
        assert!(out.iter().all(|m| (50.0..=100.0).contains(&m.score)));
    }

    #[test]
    fn min_rating_drops_low_rated() {
        let filters = FilterState {
            min_rating: 8.0,
            ..Default::default()
        };
        let out = run(sample(), &filters, &BTreeSet::new());
        assert!(out.iter().all(|m| m.rating >= 8.0));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn every_active_predicate_holds() {
        let favorites: BTreeSet<String> = ["Amélie", "Alien", "Cats"]
            .into_iter()
            .map(String::from)
            .collect();
        let filters = FilterState {
            genre: Some("Comedy".into()),
            mood: Some(Mood::FeelGood),
            language: Some("French".into()),
            favorites_only: true,
            streaming_only: true,
            ..Default::default()
        };
        let out = run(sample(), &filters, &favorites);
        assert_eq!(titles(&out), vec!["Amélie"]);
    }

    #[test]
    fn streaming_only_uses_year_proxy() {
        let filters = FilterState {
            streaming_only: true,
            ..Default::default()
        };
        let out = run(sample(), &filters, &BTreeSet::new());
        assert!(!titles(&out).contains(&"Alien"));
        assert!(out.iter().all(|m| m.year >= 2000));
    }

    #[test]
    fn favorites_only_with_empty_set_is_empty() {
        let filters = FilterState {
            favorites_only: true,
            ..Default::default()
        };
        assert!(run(sample(), &filters, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn score_sort_breaks_ties_by_rating() {
        let filters = FilterState {
            min_rating: 7.0,
            ..Default::default()
        };
        // Alien 8.5 -> 57.5, Amélie/Up 8.3 -> 56.5, Arrival 7.9 -> 54.5
        let out = run(sample(), &filters, &BTreeSet::new());
        assert_eq!(titles(&out), vec!["Alien", "Amélie", "Up", "Arrival"]);
    }

    #[test]
    fn year_sorts() {
        let mut movies = sample();
        sort(&mut movies, SortKey::YearAsc);
        assert_eq!(titles(&movies)[0], "Alien");
        sort(&mut movies, SortKey::YearDesc);
        assert_eq!(titles(&movies)[0], "Cats");
    }

    #[test]
    fn sorting_is_stable_for_equal_keys() {
        let movies = vec![
            movie("First", "Drama", 8.0, 2005),
            movie("Second", "Drama", 8.0, 2005),
            movie("Third", "Drama", 9.0, 2005),
            movie("Fourth", "Drama", 8.0, 2005),
        ];

        let mut by_year = movies.clone();
        sort(&mut by_year, SortKey::YearDesc);
        assert_eq!(titles(&by_year), vec!["First", "Second", "Third", "Fourth"]);

        let mut by_rating = movies.clone();
        sort(&mut by_rating, SortKey::RatingDesc);
        assert_eq!(titles(&by_rating), vec!["Third", "First", "Second", "Fourth"]);

        let out = run(movies, &FilterState::default(), &BTreeSet::new());
        assert_eq!(titles(&out), vec!["Third", "First", "Second", "Fourth"]);
    }
}
