//! Prompting and text generation

pub mod ollama;
pub mod pipelines;
pub mod prompt;

pub use ollama::OllamaClient;
pub use pipelines::Pipelines;
pub use prompt::{PromptTemplate, ACTION_ITEM_TEMPLATE, QA_TEMPLATE, SUMMARIZATION_TEMPLATE};
