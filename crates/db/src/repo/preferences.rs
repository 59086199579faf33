//! Favorites and theme, stored as two string keys in `settings`.

use std::collections::BTreeSet;

use cinevibe_core::Theme;
use sqlx::SqlitePool;
use tracing::warn;

use super::settings;
use crate::DbError;

pub const FAVORITES_KEY: &str = "cinevibe_favorites_v1";
pub const THEME_KEY: &str = "cinevibe_theme_v1";

/// Load favorited titles. A missing or malformed value loads as empty.
pub async fn load_favorites(pool: &SqlitePool) -> Result<BTreeSet<String>, DbError> {
    let Some(raw) = settings::get(pool, FAVORITES_KEY).await? else {
        return Ok(BTreeSet::new());
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(titles) => Ok(titles.into_iter().collect()),
        Err(e) => {
            warn!(error = %e, "discarding malformed favorites value");
            Ok(BTreeSet::new())
        }
    }
}

/// Persist favorited titles as a JSON array.
pub async fn save_favorites(pool: &SqlitePool, titles: &BTreeSet<String>) -> Result<(), DbError> {
    let json = serde_json::to_string(titles)?;
    settings::set(pool, FAVORITES_KEY, &json).await?;
    Ok(())
}

/// Load the theme, defaulting to dark for anything but `"light"`.
pub async fn load_theme(pool: &SqlitePool) -> Result<Theme, DbError> {
    let saved = settings::get(pool, THEME_KEY).await?;
    Ok(match saved.as_deref() {
        Some("light") => Theme::Light,
        _ => Theme::Dark,
    })
}

pub async fn save_theme(pool: &SqlitePool, theme: Theme) -> Result<(), DbError> {
    settings::set(pool, THEME_KEY, theme.as_str()).await?;
    Ok(())
}
