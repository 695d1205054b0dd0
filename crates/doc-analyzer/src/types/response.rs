//! Response types

use serde::{Deserialize, Serialize};

use super::document::DocumentSummary;
use crate::retrieval::ScoredChunk;

/// Preview of the loaded text with the bounds the UI slider should use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preview {
    /// First `chars` characters of the document
    pub text: String,
    /// Characters actually returned
    pub chars: usize,
    /// Smallest selectable preview
    pub min: usize,
    /// Largest selectable preview
    pub max: usize,
    /// Slider step
    pub step: usize,
}

/// Result of `POST /api/documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// What was loaded
    pub document: DocumentSummary,
    /// Initial preview
    pub preview: Preview,
}

/// A retrieved chunk as reported to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceChunk {
    /// Chunk position in the document
    pub index: usize,
    /// Chunk text
    pub content: String,
    /// Euclidean distance to the question embedding
    pub distance: f32,
}

impl From<&ScoredChunk> for SourceChunk {
    fn from(scored: &ScoredChunk) -> Self {
        Self {
            index: scored.chunk.index,
            content: scored.chunk.content.clone(),
            distance: scored.distance,
        }
    }
}

/// Result of `POST /api/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Generated answer
    pub answer: String,
    /// Chunks used as context, nearest first
    pub sources: Vec<SourceChunk>,
}

/// Result of the summarize and action-item pipelines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResponse {
    /// Generated text
    pub output: String,
}
