//! Gateway routes

pub mod answer;
pub mod items;

use axum::{routing::post, Router};

use crate::server::state::AppState;

/// Build the gateway routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/AI_Answer/", post(answer::ai_answer))
        .route("/Smart_AI_Answer/", post(answer::smart_ai_answer))
        .route("/items/", post(items::create_item))
}
