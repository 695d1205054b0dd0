//! Text generation trait used by the analysis pipelines

use async_trait::async_trait;
use crate::error::Result;

/// Trait for prompt completion
///
/// Implementations:
/// - `OllamaGenerator`: Local Ollama server (phi3, llama3, etc.)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a fully rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
