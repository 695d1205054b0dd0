//! Question answering, summary and action-item endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{AnswerResponse, AskRequest, PipelineResponse};

/// POST /api/ask - Answer a question about the current document
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AnswerResponse>> {
    let analyzer = state.analyzer().await;
    let answer = analyzer.ask(&request.question, request.top_k).await?;
    Ok(Json(answer))
}

/// POST /api/summarize
pub async fn summarize(State(state): State<AppState>) -> Result<Json<PipelineResponse>> {
    let analyzer = state.analyzer().await;
    let output = analyzer.summarize().await?;
    Ok(Json(PipelineResponse { output }))
}

/// POST /api/action-items
pub async fn action_items(State(state): State<AppState>) -> Result<Json<PipelineResponse>> {
    let analyzer = state.analyzer().await;
    let output = analyzer.extract_action_items().await?;
    Ok(Json(PipelineResponse { output }))
}
