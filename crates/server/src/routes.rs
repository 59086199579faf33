use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use cinevibe_core::error::ApiError;
use cinevibe_core::filter::{self, GENRE_OPTIONS, LANGUAGE_OPTIONS};
use cinevibe_core::{FilterState, Mood, NormalizedMovie, SortKey, Theme};
use cinevibe_discovery::Session;
use cinevibe_discovery::page::{PAGE_SIZE, summary};
use cinevibe_discovery::view::{DetailsView, MovieCard};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;
use crate::proxy::omdb_proxy;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);
    Router::new()
        .route("/health", get(health))
        .route("/api/omdb", get(omdb_proxy))
        .nest("/api/v1", api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/filters/options", get(filter_options))
        // Search and browsing
        .route("/search", get(search))
        .route("/search/more", post(search_more))
        .route("/movies/top", get(top_rated))
        .route("/movies/current", delete(close_details))
        .route("/movies/{imdb_id}", get(movie_details))
        // Favorites
        .route("/favorites", get(list_favorites))
        .route("/favorites/toggle", post(toggle_favorite))
        // Preferences
        .route("/preferences/theme", get(get_theme).put(put_theme))
        .route("/preferences/theme/toggle", post(toggle_theme))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1")
        .execute(&state.db)
        .await
        .map_err(|e| ApiError::Internal(format!("database check failed: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Filter options
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FilterOptions {
    genres: Vec<&'static str>,
    moods: Vec<&'static str>,
    languages: Vec<&'static str>,
    sort: Vec<&'static str>,
}

fn with_any(values: impl IntoIterator<Item = &'static str>) -> Vec<&'static str> {
    std::iter::once(filter::ANY).chain(values).collect()
}

async fn filter_options() -> Json<FilterOptions> {
    Json(FilterOptions {
        genres: with_any(GENRE_OPTIONS.iter().copied()),
        moods: with_any(Mood::ALL.into_iter().map(Mood::as_str)),
        languages: with_any(LANGUAGE_OPTIONS.iter().copied()),
        sort: SortKey::ALL.into_iter().map(SortKey::as_str).collect(),
    })
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
    genre: Option<String>,
    mood: Option<String>,
    language: Option<String>,
    min_rating: Option<f64>,
    streaming_only: Option<bool>,
    sort: Option<String>,
    favorites_only: Option<bool>,
}

impl SearchParams {
    fn into_filters(self) -> Result<FilterState, ApiError> {
        let mood = filter::selection(self.mood.as_deref())
            .map(|m| m.parse::<Mood>())
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let sort = match self.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => s
                .parse::<SortKey>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
            None => SortKey::default(),
        };

        let min_rating = self.min_rating.unwrap_or(0.0);
        if !(0.0..=10.0).contains(&min_rating) {
            return Err(ApiError::BadRequest(format!(
                "min_rating must be between 0 and 10, got {min_rating}"
            )));
        }

        Ok(FilterState {
            query: self.q.unwrap_or_default().trim().to_string(),
            genre: filter::selection(self.genre.as_deref()),
            mood,
            language: filter::selection(self.language.as_deref()),
            min_rating,
            streaming_only: self.streaming_only.unwrap_or(false),
            sort,
            favorites_only: self.favorites_only.unwrap_or(false),
        })
    }
}

#[derive(Serialize)]
struct ResultsResponse {
    cards: Vec<MovieCard>,
    total: usize,
    visible: usize,
    has_more: bool,
    message: String,
    /// A newer search started while this one ran; the results were not
    /// committed to the session.
    stale: bool,
}

fn card_views(movies: &[NormalizedMovie], session: &Session) -> Vec<MovieCard> {
    movies
        .iter()
        .map(|m| MovieCard::new(m, session.is_favorite(&m.title)))
        .collect()
}

/// Commit `movies` under `token` and describe the first page.
fn first_page(
    session: &mut Session,
    token: cinevibe_discovery::SearchToken,
    movies: Vec<NormalizedMovie>,
    message: String,
) -> ResultsResponse {
    let total = movies.len();
    let visible = total.min(PAGE_SIZE);
    let cards = card_views(&movies[..visible], session);
    let stale = !session.commit(token, movies);
    ResultsResponse {
        cards,
        total,
        visible,
        has_more: visible < total,
        message,
        stale,
    }
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ResultsResponse>, AppError> {
    let filters = params.into_filters()?;

    let (token, favorites) = {
        let mut session = state.session.lock().await;
        (session.begin_search(), session.favorites().clone())
    };

    let outcome = state.discovery.search(&filters, &favorites).await;
    let message = outcome.message(outcome.movies().len().min(PAGE_SIZE));
    info!(
        query = %filters.query,
        token = token.value(),
        results = outcome.movies().len(),
        "search finished"
    );

    let mut session = state.session.lock().await;
    Ok(Json(first_page(
        &mut session,
        token,
        outcome.into_movies(),
        message,
    )))
}

async fn search_more(State(state): State<AppState>) -> Json<ResultsResponse> {
    let mut session = state.session.lock().await;
    let added = session.load_more().to_vec();
    let total = session.displayed().len();
    let visible = session.visible();
    Json(ResultsResponse {
        cards: card_views(&added, &session),
        total,
        visible,
        has_more: session.has_more(),
        message: summary(total, visible),
        stale: false,
    })
}

async fn top_rated(State(state): State<AppState>) -> Json<ResultsResponse> {
    let token = state.session.lock().await.begin_search();
    let movies = state.discovery.top_rated(&FilterState::default()).await;
    let message = summary(movies.len(), movies.len().min(PAGE_SIZE));

    let mut session = state.session.lock().await;
    Json(first_page(&mut session, token, movies, message))
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

async fn movie_details(
    State(state): State<AppState>,
    Path(imdb_id): Path<String>,
) -> Result<Json<DetailsView>, AppError> {
    let movie = state
        .discovery
        .details(&imdb_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("movie {imdb_id} not found")))?;

    let mut session = state.session.lock().await;
    let view = DetailsView::new(&movie, session.is_favorite(&movie.title));
    session.open_details(movie);
    Ok(Json(view))
}

#[derive(Serialize)]
struct CloseResponse {
    closed: bool,
}

async fn close_details(State(state): State<AppState>) -> Json<CloseResponse> {
    let closed = state.session.lock().await.close_details().is_some();
    Json(CloseResponse { closed })
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FavoritesResponse {
    favorites: Vec<String>,
}

async fn list_favorites(State(state): State<AppState>) -> Json<FavoritesResponse> {
    let session = state.session.lock().await;
    Json(FavoritesResponse {
        favorites: session.favorites().iter().cloned().collect(),
    })
}

#[derive(Deserialize)]
struct ToggleFavoriteRequest {
    title: String,
}

#[derive(Serialize)]
struct ToggleFavoriteResponse {
    title: String,
    favorite: bool,
    favorites: Vec<String>,
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Json(body): Json<ToggleFavoriteRequest>,
) -> Result<Json<ToggleFavoriteResponse>, AppError> {
    let mut session = state.session.lock().await;
    let (next, favorite) = session
        .toggled_favorites(&body.title)
        .ok_or_else(|| ApiError::BadRequest("title must not be empty".into()))?;

    // The session only changes once the new set is stored.
    cinevibe_db::repo::preferences::save_favorites(&state.db, &next).await?;
    session.replace_favorites(next);

    Ok(Json(ToggleFavoriteResponse {
        title: body.title.trim().to_string(),
        favorite,
        favorites: session.favorites().iter().cloned().collect(),
    }))
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct ThemeBody {
    theme: String,
}

async fn get_theme(State(state): State<AppState>) -> Result<Json<ThemeBody>, AppError> {
    let theme = cinevibe_db::repo::preferences::load_theme(&state.db).await?;
    Ok(Json(ThemeBody {
        theme: theme.to_string(),
    }))
}

async fn put_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, AppError> {
    let theme = body
        .theme
        .trim()
        .parse::<Theme>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    cinevibe_db::repo::preferences::save_theme(&state.db, theme).await?;
    Ok(Json(ThemeBody {
        theme: theme.to_string(),
    }))
}

async fn toggle_theme(State(state): State<AppState>) -> Result<Json<ThemeBody>, AppError> {
    let theme = cinevibe_db::repo::preferences::load_theme(&state.db)
        .await?
        .toggled();
    cinevibe_db::repo::preferences::save_theme(&state.db, theme).await?;
    Ok(Json(ThemeBody {
        theme: theme.to_string(),
    }))
}
