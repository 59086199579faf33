//! Fixed-size paging over an ordered result list.

use cinevibe_core::NormalizedMovie;

pub const PAGE_SIZE: usize = 8;

pub const NO_RESULTS_MESSAGE: &str = "No movies found. Try a different search.";

/// The page starting at `offset`; empty past the end.
pub fn page_at(movies: &[NormalizedMovie], offset: usize) -> &[NormalizedMovie] {
    let start = offset.min(movies.len());
    let end = (start + PAGE_SIZE).min(movies.len());
    &movies[start..end]
}

/// Status line for `total` results of which `visible` are shown.
pub fn summary(total: usize, visible: usize) -> String {
    if total == 0 {
        return NO_RESULTS_MESSAGE.to_string();
    }
    let plural = if total == 1 { "" } else { "s" };
    format!("{total} result{plural} found • Showing {visible}")
}
