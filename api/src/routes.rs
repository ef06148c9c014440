use axum::{routing::get, Router};

use crate::{handlers, metrics_handler, pokemon_handlers, state::AppState};

pub fn pokemon_routes() -> Router<AppState> {
    Router::new().route("/v1/pokemon", get(pokemon_handlers::get_pokemon_list))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler::metrics_endpoint))
}
