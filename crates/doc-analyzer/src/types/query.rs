//! Request types

use serde::{Deserialize, Serialize};

/// Question against the loaded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The question to answer
    pub question: String,

    /// Number of chunks to retrieve (defaults to `retrieval.top_k`)
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// `?chars=N` on the preview endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewQuery {
    pub chars: Option<usize>,
}
