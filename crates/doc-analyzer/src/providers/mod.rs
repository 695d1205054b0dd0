//! Provider abstractions for embeddings and text generation
//!
//! Concrete providers are constructed once at startup by [`build_providers`]
//! and injected into the analyzer.

pub mod embedding;
pub mod llm;
pub mod ollama;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

pub use embedding::EmbeddingProvider;
pub use llm::TextGenerator;
pub use ollama::{OllamaEmbedder, OllamaGenerator, OllamaProvider};

use crate::config::{AnalyzerConfig, EmbeddingBackend};
use crate::error::Result;

/// Construct the embedding and generation providers named by the config
pub async fn build_providers(
    config: &AnalyzerConfig,
) -> Result<(Arc<dyn EmbeddingProvider>, Arc<dyn TextGenerator>)> {
    let (ollama_embedder, generator) =
        OllamaProvider::new(&config.llm, config.embeddings.dimensions)?.split();

    let embedder: Arc<dyn EmbeddingProvider> = match config.embeddings.backend {
        EmbeddingBackend::Ollama => {
            tracing::info!(
                "Using Ollama embeddings ({}, {} dims)",
                config.llm.embed_model,
                config.embeddings.dimensions
            );
            Arc::new(ollama_embedder)
        }
        #[cfg(feature = "onnx")]
        EmbeddingBackend::Onnx => Arc::new(
            crate::embeddings::OnnxEmbedder::new(&config.embeddings).await?,
        ),
        #[cfg(not(feature = "onnx"))]
        EmbeddingBackend::Onnx => {
            return Err(crate::error::Error::Config(
                "embeddings.backend = \"onnx\" requires building with the `onnx` feature".into(),
            ))
        }
    };

    let generator: Arc<dyn TextGenerator> = Arc::new(generator);
    tracing::info!("Using {} generator ({})", generator.name(), generator.model());

    Ok((embedder, generator))
}
