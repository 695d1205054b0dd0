//! doc-analyzer: document question answering, summaries and action items
//!
//! Loads a single document (text, PDF, DOCX or an image through OCR), splits
//! its text into chunks, embeds them into an exact L2 index and runs
//! retrieval-augmented prompts against a text generation model.

pub mod analyzer;
pub mod config;
#[cfg(feature = "onnx")]
pub mod embeddings;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use analyzer::{DocumentAnalyzer, DocumentSession};
pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use types::{Chunk, DocumentSummary, FileType, LoadedDocument};
