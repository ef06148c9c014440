use prometheus::Registry;
use sqlx::PgPool;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(db: PgPool, registry: Registry) -> Self {
        Self {
            db,
            started_at: Instant::now(),
            registry,
        }
    }
}
