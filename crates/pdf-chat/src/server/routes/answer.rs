//! Answer endpoints

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{AnswerRequest, AnswerResponse, RoutedAnswerResponse};

/// `POST /AI_Answer/`: answer directly from the supplied context
pub async fn ai_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let start = Instant::now();
    tracing::info!("Direct answer: \"{}\"", request.query);

    let message = state
        .service()
        .direct_answer(&request.query, &request.context)
        .await?;

    tracing::info!("Direct answer completed in {}ms", start.elapsed().as_millis());
    Ok(Json(AnswerResponse { message }))
}

/// `POST /Smart_AI_Answer/`: route across the three answering paths
pub async fn smart_ai_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<RoutedAnswerResponse>> {
    let start = Instant::now();
    tracing::info!("Routed answer: \"{}\"", request.query);

    let routed = state
        .service()
        .routed_answer(&request.query, &request.context)
        .await?;

    tracing::info!(
        "Routed answer completed in {}ms via {}",
        start.elapsed().as_millis(),
        routed.path
    );

    Ok(Json(RoutedAnswerResponse {
        path: routed.path,
        message: routed.message,
    }))
}
