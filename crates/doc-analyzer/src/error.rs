//! Error types for the document analyzer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Document analyzer errors
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input path has no extension to dispatch on
    #[error("No file extension found for '{}'. Please provide a valid file path with an extension.", .0.display())]
    MissingExtension(PathBuf),

    /// Extension is not one of the supported formats
    #[error("Unsupported file format: '.{0}'")]
    UnsupportedFormat(String),

    /// An extractor failed to pull text out of a document
    #[error("Failed to extract text from {format}: {message}")]
    Extraction { format: String, message: String },

    /// The configured OCR binary cannot be executed
    #[error("OCR engine unavailable at '{0}'. Install tesseract or set ocr.tesseract_path")]
    OcrUnavailable(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Prompt template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Query issued before any index was built
    #[error("Index has not been built; load a document first")]
    IndexNotBuilt,

    /// No document is loaded in the current session
    #[error("No document loaded")]
    NoDocument,

    /// Text generation error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Model server unreachable or connection dropped
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable error type used in HTTP responses
    pub fn kind(&self) -> &'static str {
        match self {
            Error::FileNotFound(_) => "file_not_found",
            Error::MissingExtension(_) => "missing_extension",
            Error::UnsupportedFormat(_) => "unsupported_format",
            Error::Extraction { .. } => "extraction_error",
            Error::OcrUnavailable(_) => "ocr_unavailable",
            Error::InvalidInput(_) => "invalid_input",
            Error::Template(_) => "template_error",
            Error::Embedding(_) => "embedding_error",
            Error::IndexNotBuilt => "index_not_built",
            Error::NoDocument => "no_document",
            Error::Llm(_) => "llm_error",
            Error::Config(_) => "config_error",
            Error::Io(_) => "io_error",
            Error::Http(_) => "http_error",
            Error::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Error::FileNotFound(_) | Error::NoDocument => StatusCode::NOT_FOUND,
            Error::MissingExtension(_)
            | Error::UnsupportedFormat(_)
            | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::IndexNotBuilt => StatusCode::CONFLICT,
            Error::OcrUnavailable(_) | Error::Llm(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Template(_)
            | Error::Embedding(_)
            | Error::Config(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
