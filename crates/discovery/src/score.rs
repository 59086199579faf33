use cinevibe_core::{FilterState, NormalizedMovie};

pub const BASE_SCORE: f64 = 50.0;
pub const MATCH_BONUS: f64 = 25.0;
pub const MAX_RATING_BONUS: f64 = 25.0;
pub const RATING_BONUS_PER_POINT: f64 = 5.0;
pub const MAX_SCORE: f64 = 100.0;

/// Relevance of `movie` under `filters`, in [50, 100].
///
/// Genre and mood bonuses only apply when that selector is active. The
/// rating bonus grows with how far the rating clears the threshold.
pub fn score(movie: &NormalizedMovie, filters: &FilterState) -> f64 {
    let mut score = BASE_SCORE;

    if filters.genre.as_deref() == Some(movie.genre.as_str()) {
        score += MATCH_BONUS;
    }

    if filters.mood.is_some_and(|m| movie.has_mood(m)) {
        score += MATCH_BONUS;
    }

    let above = (movie.rating - filters.min_rating).max(0.0);
    score += (above * RATING_BONUS_PER_POINT).min(MAX_RATING_BONUS);

    score.min(MAX_SCORE)
}
