//! Core types for the document analyzer

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, DocumentSummary, FileType, LoadedDocument};
pub use query::{AskRequest, PreviewQuery};
pub use response::{AnswerResponse, PipelineResponse, Preview, SourceChunk, UploadResponse};
