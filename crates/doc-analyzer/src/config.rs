//! Configuration for the document analyzer

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main analyzer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
    /// OCR configuration
    pub ocr: OcrConfig,
    /// Pipeline input and preview limits
    pub pipelines: PipelineConfig,
}

impl AnalyzerConfig {
    /// Load configuration from an optional TOML file, then apply
    /// `DOC_ANALYZER_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply environment overrides through a lookup function
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DOC_ANALYZER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DOC_ANALYZER_PORT") {
            self.server.port = parse_env("DOC_ANALYZER_PORT", &port)?;
        }
        if let Some(url) = lookup("DOC_ANALYZER_OLLAMA_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup("DOC_ANALYZER_GENERATE_MODEL") {
            self.llm.generate_model = model;
        }
        if let Some(model) = lookup("DOC_ANALYZER_EMBED_MODEL") {
            self.llm.embed_model = model;
        }
        if let Some(path) = lookup("DOC_ANALYZER_TESSERACT") {
            self.ocr.tesseract_path = PathBuf::from(path);
        }
        if let Some(size) = lookup("DOC_ANALYZER_CHUNK_CHARS") {
            self.chunking.max_chars = parse_env("DOC_ANALYZER_CHUNK_CHARS", &size)?;
        }
        Ok(())
    }

    /// Reject configurations that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_chars == 0 {
            return Err(Error::Config("chunking.max_chars must be greater than 0".into()));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::Config("retrieval.top_k must be greater than 0".into()));
        }
        if self.embeddings.dimensions == 0 {
            return Err(Error::Config("embeddings.dimensions must be greater than 0".into()));
        }
        let p = &self.pipelines;
        if p.preview_step == 0 || p.preview_min > p.preview_max {
            return Err(Error::Config(format!(
                "invalid preview bounds: min {} max {} step {}",
                p.preview_min, p.preview_max, p.preview_step
            )));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has invalid value '{}'", key, value)))
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 25MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 25 * 1024 * 1024,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_chars: 500 }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Chunks retrieved as context for question answering
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

/// Which encoder produces embeddings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Ollama `/api/embeddings`
    #[default]
    Ollama,
    /// Local ONNX Runtime session (requires the `onnx` feature)
    Onnx,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Encoder backend
    pub backend: EmbeddingBackend,
    /// Sentence-transformers model used by the ONNX backend
    pub model: String,
    /// Embedding dimensions (384 for MiniLM)
    pub dimensions: usize,
    /// Batch size for embedding generation
    pub batch_size: usize,
    /// Maximum sequence length
    pub max_length: usize,
    /// Cache directory for models
    pub cache_dir: PathBuf,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Ollama,
            model: "all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            batch_size: 32,
            max_length: 256,
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("doc-analyzer")
                .join("models"),
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Upper bound on generated tokens; longer outputs are cut silently
    pub max_tokens: u32,
    /// Temperature for generation (0 = greedy)
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "all-minilm".to_string(),
            generate_model: "phi3".to_string(),
            max_tokens: 128,
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

/// OCR configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract executable; a bare name is resolved through `PATH`
    pub tesseract_path: PathBuf,
    /// Tesseract language pack
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }
}

/// Pipeline input and preview limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Characters of document text fed to summarize / action-item pipelines
    pub input_char_limit: usize,
    /// Default preview length
    pub preview_default: usize,
    /// Smallest preview length offered
    pub preview_min: usize,
    /// Largest preview length offered
    pub preview_max: usize,
    /// Preview slider step
    pub preview_step: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_char_limit: 1500,
            preview_default: 600,
            preview_min: 100,
            preview_max: 10_000,
            preview_step: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
            [chunking]
            max_chars = 800

            [ocr]
            tesseract_path = "/opt/tesseract/bin/tesseract"
            "#,
        )
        .unwrap();

        assert_eq!(config.chunking.max_chars, 800);
        assert_eq!(
            config.ocr.tesseract_path,
            PathBuf::from("/opt/tesseract/bin/tesseract")
        );
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.llm.max_tokens, 128);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("DOC_ANALYZER_PORT", "9000"),
            ("DOC_ANALYZER_TESSERACT", "/usr/local/bin/tesseract"),
        ]
        .into_iter()
        .collect();

        let mut config = AnalyzerConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.ocr.tesseract_path,
            PathBuf::from("/usr/local/bin/tesseract")
        );
    }

    #[test]
    fn test_bad_env_value_is_config_error() {
        let mut config = AnalyzerConfig::default();
        let err = config
            .apply_env(|key| (key == "DOC_ANALYZER_PORT").then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let mut config = AnalyzerConfig::default();
        config.chunking.max_chars = 0;
        assert!(config.validate().is_err());
    }
}
