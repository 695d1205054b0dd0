//! Chunk embedding and nearest-neighbour retrieval

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::Chunk;

use super::flat::{FlatIndex, IndexEntry, ScoredChunk};

/// Embeds chunks into a [`FlatIndex`] and queries it with the same encoder
pub struct EmbeddingIndexer {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Option<FlatIndex>,
}

impl EmbeddingIndexer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            index: None,
        }
    }

    /// Current index, if one has been built
    pub fn index(&self) -> Option<&FlatIndex> {
        self.index.as_ref()
    }

    /// Embed every chunk and replace any previous index
    pub async fn build_index(&mut self, chunks: Vec<Chunk>) -> Result<()> {
        let dimensions = self.embedder.dimensions();
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();

        let vectors = if texts.is_empty() {
            Vec::new()
        } else {
            self.embedder.embed_batch(&texts).await?
        };

        if vectors.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "{} returned {} embeddings for {} chunks",
                self.embedder.name(),
                vectors.len(),
                chunks.len()
            )));
        }

        let entries = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();
        let index = FlatIndex::new(dimensions, entries)?;

        tracing::info!(
            "Indexed {} chunks with {} ({} dims)",
            index.len(),
            self.embedder.name(),
            dimensions
        );

        self.index = Some(index);
        Ok(())
    }

    /// Retrieve the `top_k` chunks nearest to `question`
    pub async fn query(&self, question: &str, top_k: usize) -> Result<Vec<ScoredChunk>> {
        let index = self.index.as_ref().ok_or(Error::IndexNotBuilt)?;
        let vector = self.embedder.embed(question).await?;
        let results = index.search(&vector, top_k)?;

        tracing::debug!(
            "Query matched {} of {} chunks (top_k {})",
            results.len(),
            index.len(),
            top_k
        );

        Ok(results)
    }
}
