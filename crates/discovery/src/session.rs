//! Per-user UI state: favorites, the displayed result list, and the open
//! details view.
//!
//! Searches are tagged with a [`SearchToken`]. Only the most recently issued
//! token may replace the displayed results, so a slow earlier search can no
//! longer overwrite a newer one.

use std::collections::BTreeSet;

use cinevibe_core::NormalizedMovie;
use tracing::debug;

use crate::page::{PAGE_SIZE, page_at};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchToken(u64);

impl SearchToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Session {
    favorites: BTreeSet<String>,
    latest_token: u64,
    displayed: Vec<NormalizedMovie>,
    visible: usize,
    details: Option<NormalizedMovie>,
}

impl Session {
    pub fn new(favorites: BTreeSet<String>) -> Self {
        Self {
            favorites,
            ..Default::default()
        }
    }

    // Favorites

    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    pub fn is_favorite(&self, title: &str) -> bool {
        self.favorites.contains(title)
    }

    /// The favorites set with `title` flipped, and whether it is now in the
    /// set. The session itself is unchanged; `None` for a blank title.
    pub fn toggled_favorites(&self, title: &str) -> Option<(BTreeSet<String>, bool)> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let mut favorites = self.favorites.clone();
        let now_favorite = if favorites.remove(title) {
            false
        } else {
            favorites.insert(title.to_string());
            true
        };
        Some((favorites, now_favorite))
    }

    pub fn replace_favorites(&mut self, favorites: BTreeSet<String>) {
        self.favorites = favorites;
    }

    // Search tokens

    /// Issue the token for a new search, superseding all earlier ones.
    pub fn begin_search(&mut self) -> SearchToken {
        self.latest_token += 1;
        SearchToken(self.latest_token)
    }

    pub fn is_latest(&self, token: SearchToken) -> bool {
        token.0 == self.latest_token
    }

    /// Replace the displayed results if `token` is still the latest.
    /// Returns `false` (and changes nothing) for a stale token.
    pub fn commit(&mut self, token: SearchToken, movies: Vec<NormalizedMovie>) -> bool {
        if !self.is_latest(token) {
            debug!(
                token = token.0,
                latest = self.latest_token,
                "discarding stale search result"
            );
            return false;
        }
        self.visible = movies.len().min(PAGE_SIZE);
        self.displayed = movies;
        true
    }

    // Paging

    pub fn displayed(&self) -> &[NormalizedMovie] {
        &self.displayed
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn visible_movies(&self) -> &[NormalizedMovie] {
        &self.displayed[..self.visible]
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.displayed.len()
    }

    /// Reveal the next page and return just the newly visible movies.
    pub fn load_more(&mut self) -> &[NormalizedMovie] {
        let start = self.visible;
        let added = page_at(&self.displayed, start).len();
        self.visible += added;
        &self.displayed[start..self.visible]
    }

    // Details view

    pub fn open_details(&mut self, movie: NormalizedMovie) {
        self.details = Some(movie);
    }

    pub fn close_details(&mut self) -> Option<NormalizedMovie> {
        self.details.take()
    }

    pub fn details(&self) -> Option<&NormalizedMovie> {
        self.details.as_ref()
    }
}
