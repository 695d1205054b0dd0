//! HTTP server for the document analyzer

pub mod routes;
pub mod state;
pub mod upload;

use axum::{response::Html, routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Analyzer HTTP Server
pub struct AnalyzerServer {
    config: AnalyzerConfig,
    state: AppState,
}

impl AnalyzerServer {
    /// Create a server, constructing providers from the configuration
    pub async fn new(config: AnalyzerConfig) -> Result<Self> {
        let state = AppState::from_config(config.clone()).await?;
        Ok(Self { config, state })
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.router();

        tracing::info!("Starting document analyzer on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Router over the given state
pub fn build_router(state: AppState) -> Router {
    let server = &state.config().server;
    let router = Router::new()
        .route("/", get(index_page))
        .route("/health", get(health_check))
        .nest("/api", routes::api_routes(server.max_upload_size))
        .layer(TraceLayer::new_for_http());

    let router = if server.enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Single-page UI
async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::DocumentAnalyzer;
    use crate::ingestion::DocumentLoader;
    use crate::providers::testing::{CannedGenerator, EchoGenerator, HashEmbedder};
    use crate::providers::{OllamaProvider, TextGenerator};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "doc-analyzer-test-boundary";

    fn test_router() -> Router {
        router_with(Arc::new(EchoGenerator::default()))
    }

    fn router_with(generator: Arc<dyn TextGenerator>) -> Router {
        let config = AnalyzerConfig::default();
        let analyzer = DocumentAnalyzer::new(
            &config,
            DocumentLoader::from_config(&config.ocr),
            Arc::new(HashEmbedder::new(128)),
            generator,
        )
        .unwrap();
        build_router(AppState::new(config, analyzer, None))
    }

    fn upload_request(filename: &str, content: &str, preview_chars: Option<&str>) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
        );
        if let Some(chars) = preview_chars {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"preview_chars\"\r\n\r\n{chars}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::post("/api/documents")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn empty_post(uri: &str) -> Request<Body> {
        Request::post(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_and_index() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8_lossy(&bytes);
        assert!(page.contains("Extract Action Items"));
        assert!(page.contains("Summarize Document"));
    }

    #[tokio::test]
    async fn test_upload_then_extract_action_items() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(upload_request(
                "minutes.txt",
                "Alice must finish the report by Friday.",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let upload = json_body(response).await;
        assert_eq!(upload["document"]["filename"], "minutes.txt");
        assert_eq!(upload["document"]["file_type"], "txt");
        assert_eq!(upload["document"]["chunks"], 1);
        assert_eq!(
            upload["preview"]["text"],
            "Alice must finish the report by Friday."
        );

        let response = router
            .oneshot(empty_post("/api/action-items"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let output = json_body(response).await["output"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(!output.is_empty());
        assert!(output.contains("finish the report"));
    }

    #[tokio::test]
    async fn test_action_items_return_generated_text() {
        let router = router_with(Arc::new(CannedGenerator::new(
            "\n  1. Finish the report - Alice - Friday\n",
        )));
        router
            .clone()
            .oneshot(upload_request(
                "minutes.txt",
                "Alice must finish the report by Friday.",
                None,
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(empty_post("/api/action-items"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["output"],
            "1. Finish the report - Alice - Friday"
        );
    }

    #[tokio::test]
    async fn test_unreachable_model_server_is_bad_gateway() {
        let mut llm = crate::config::LlmConfig::default();
        llm.base_url = "http://127.0.0.1:9".into();
        llm.timeout_secs = 2;
        let (_, generator) = OllamaProvider::new(&llm, 384).unwrap().split();

        let router = router_with(Arc::new(generator));
        router
            .clone()
            .oneshot(upload_request("minutes.txt", "Quarterly numbers are up.", None))
            .await
            .unwrap();

        let response = router.oneshot(empty_post("/api/summarize")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["type"], "http_error");
    }

    #[tokio::test]
    async fn test_ask_returns_sources() {
        let router = test_router();
        router
            .clone()
            .oneshot(upload_request(
                "minutes.txt",
                "The budget was approved. Alice must finish the report by Friday.",
                Some("100"),
            ))
            .await
            .unwrap();

        let response = router
            .oneshot(
                Request::post("/api/ask")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"question":"Who finishes the report?","top_k":5}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sources"].as_array().unwrap().len(), 1);
        assert!(body["answer"]
            .as_str()
            .unwrap()
            .contains("Question:\nWho finishes the report?"));
    }

    #[tokio::test]
    async fn test_requests_before_upload() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(empty_post("/api/summarize"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["type"], "no_document");

        let response = router
            .oneshot(
                Request::get("/api/documents/current/preview?chars=300")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_upload() {
        let router = test_router();
        let response = router
            .oneshot(upload_request("budget.xlsx", "cells", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["type"], "unsupported_format");
        assert_eq!(body["error"]["message"], "Unsupported file format: '.xlsx'");
    }

    #[tokio::test]
    async fn test_preview_endpoint() {
        let router = test_router();
        let text = "word ".repeat(400);
        router
            .clone()
            .oneshot(upload_request("long.txt", &text, None))
            .await
            .unwrap();

        let response = router
            .oneshot(
                Request::get("/api/documents/current/preview?chars=300")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["chars"], 300);
        assert_eq!(body["max"], 2000);
        assert_eq!(body["text"].as_str().unwrap().chars().count(), 300);
    }
}
