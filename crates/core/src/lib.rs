pub mod error;
pub mod filter;
pub mod movie;
pub mod types;

pub use filter::FilterState;
pub use movie::NormalizedMovie;
pub use types::{Mood, SortKey, Theme};
