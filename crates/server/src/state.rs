use std::sync::Arc;

use cinevibe_discovery::{Discovery, Session};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub discovery: Arc<Discovery>,
    pub session: Arc<Mutex<Session>>,
    /// Allowed CORS origins; empty allows any.
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(db: SqlitePool, discovery: Discovery, session: Session) -> Self {
        Self {
            db,
            discovery: Arc::new(discovery),
            session: Arc::new(Mutex::new(session)),
            cors_origins: Vec::new(),
        }
    }
}
