use axum::{routing::get, Router};
use ping::ping;

use crate::{config::AppConfig, state::AppState};

pub mod ping;

pub fn register_routes(config: AppConfig) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .with_state(AppState::new(config))
}
