pub mod page;
pub mod pipeline;
pub mod score;
pub mod search;
pub mod session;
pub mod view;

pub use search::{Discovery, SearchOutcome};
pub use session::{SearchToken, Session};

#[cfg(test)]
pub(crate) mod testing {
    use cinevibe_core::{Mood, NormalizedMovie};

    /// Minimal movie for pipeline tests.
    pub fn movie(title: &str, genre: &str, rating: f64, year: u32) -> NormalizedMovie {
        NormalizedMovie {
            title: title.to_string(),
            year,
            genre: genre.to_string(),
            runtime: 100,
            moods: vec![Mood::Thoughtful],
            rating,
            tags: Vec::new(),
            streaming: true,
            poster: String::new(),
            description: String::new(),
            imdb: None,
            where_to_watch: "Other".to_string(),
            languages: vec!["English".to_string()],
            score: 0.0,
        }
    }
}
