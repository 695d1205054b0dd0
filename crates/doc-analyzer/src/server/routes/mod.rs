//! API routes for the analyzer server

pub mod analysis;
pub mod documents;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;
use crate::types::FileType;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with larger body limit for documents
        .route(
            "/documents",
            post(documents::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/documents/current/preview", get(documents::preview_document))
        .route("/ask", post(analysis::ask))
        .route("/summarize", post(analysis::summarize))
        .route("/action-items", post(analysis::action_items))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.config();
    Json(serde_json::json!({
        "name": "doc-analyzer",
        "version": env!("CARGO_PKG_VERSION"),
        "supported_extensions": FileType::SUPPORTED_EXTENSIONS,
        "ocr_available": state.ocr_version().is_some(),
        "preview": {
            "default": config.pipelines.preview_default,
            "min": config.pipelines.preview_min,
            "max": config.pipelines.preview_max,
            "step": config.pipelines.preview_step,
        },
        "endpoints": {
            "POST /api/documents": "Upload a document (multipart: file, preview_chars)",
            "GET /api/documents/current/preview": "Preview the loaded document (?chars=N)",
            "POST /api/ask": "Answer a question from retrieved chunks",
            "POST /api/summarize": "Summarize the document",
            "POST /api/action-items": "Extract action items"
        }
    }))
}
