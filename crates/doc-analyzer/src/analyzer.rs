//! The document analysis service: one loaded document at a time

use std::path::Path;
use std::sync::Arc;

use crate::config::{AnalyzerConfig, PipelineConfig};
use crate::error::{Error, Result};
use crate::generation::Pipelines;
use crate::ingestion::{DocumentLoader, TextChunker};
use crate::providers::{EmbeddingProvider, TextGenerator};
use crate::retrieval::EmbeddingIndexer;
use crate::types::{
    AnswerResponse, DocumentSummary, FileType, LoadedDocument, Preview, SourceChunk,
};

/// The currently loaded document. Its index lives in the analyzer's indexer.
#[derive(Debug, Clone)]
pub struct DocumentSession {
    pub filename: String,
    pub file_type: FileType,
    pub text: String,
    pub content_hash: String,
    pub chunks: usize,
}

impl DocumentSession {
    fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            filename: self.filename.clone(),
            file_type: self.file_type,
            characters: self.text.chars().count(),
            chunks: self.chunks,
            content_hash: self.content_hash.clone(),
        }
    }
}

/// Owns the loader, chunker, indexer and pipelines plus the current session
pub struct DocumentAnalyzer {
    loader: Arc<DocumentLoader>,
    chunker: TextChunker,
    indexer: EmbeddingIndexer,
    pipelines: Pipelines,
    top_k: usize,
    limits: PipelineConfig,
    session: Option<DocumentSession>,
}

impl DocumentAnalyzer {
    /// Assemble the analyzer from configuration and constructed services
    pub fn new(
        config: &AnalyzerConfig,
        loader: DocumentLoader,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            loader: Arc::new(loader),
            chunker: TextChunker::new(config.chunking.max_chars)?,
            indexer: EmbeddingIndexer::new(embedder),
            pipelines: Pipelines::new(generator),
            top_k: config.retrieval.top_k,
            limits: config.pipelines.clone(),
            session: None,
        })
    }

    /// Current session, if a document is loaded
    pub fn session(&self) -> Option<&DocumentSession> {
        self.session.as_ref()
    }

    /// Load a file, naming the document after its path
    pub async fn load_path(&mut self, path: &Path) -> Result<DocumentSummary> {
        let loader = Arc::clone(&self.loader);
        let owned = path.to_path_buf();
        let doc = tokio::task::spawn_blocking(move || loader.load(&owned))
            .await
            .map_err(|e| Error::internal(format!("Loader task failed: {}", e)))??;
        self.install(doc).await
    }

    /// Load a file under the client-supplied `filename`
    pub async fn load_file(&mut self, path: &Path, filename: &str) -> Result<DocumentSummary> {
        let loader = Arc::clone(&self.loader);
        let owned = path.to_path_buf();
        let name = filename.to_string();
        let doc = tokio::task::spawn_blocking(move || loader.load_as(&owned, &name))
            .await
            .map_err(|e| Error::internal(format!("Loader task failed: {}", e)))??;
        self.install(doc).await
    }

    /// Chunk and index a loaded document, then make it the current session.
    /// On failure the previous session stays in place.
    async fn install(&mut self, doc: LoadedDocument) -> Result<DocumentSummary> {
        let chunks = self.chunker.chunk(&doc.text);
        let chunk_count = chunks.len();
        self.indexer.build_index(chunks).await?;

        let session = DocumentSession {
            content_hash: doc.content_hash(),
            filename: doc.filename,
            file_type: doc.file_type,
            text: doc.text,
            chunks: chunk_count,
        };
        let summary = session.summary();
        tracing::info!(
            "[{}] Loaded {} characters in {} chunks",
            summary.filename,
            summary.characters,
            summary.chunks
        );

        self.session = Some(session);
        Ok(summary)
    }

    fn current(&self) -> Result<&DocumentSession> {
        self.session.as_ref().ok_or(Error::NoDocument)
    }

    /// Leading characters of the document. The requested length falls back
    /// to the configured default and is clamped to the slider bounds.
    pub fn preview(&self, chars: Option<usize>) -> Result<Preview> {
        let session = self.current()?;
        let len = session.text.chars().count();
        let limits = &self.limits;

        let min = limits.preview_min.min(len);
        let max = limits.preview_max.min(len);
        let step = limits.preview_step.max(1);

        let requested = chars.unwrap_or(limits.preview_default).clamp(min, max);
        let chars = if requested == max {
            requested
        } else {
            min + (requested - min) / step * step
        };

        Ok(Preview {
            text: char_prefix(&session.text, chars).to_string(),
            chars,
            min,
            max,
            step,
        })
    }

    /// Answer a question from the chunks nearest to it
    pub async fn ask(&self, question: &str, top_k: Option<usize>) -> Result<AnswerResponse> {
        self.current()?;
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::invalid_input("question must not be empty"));
        }

        let top_k = top_k.unwrap_or(self.top_k);
        let retrieved = self.indexer.query(question, top_k).await?;
        let context = retrieved
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let answer = self.pipelines.answer_question(&context, question).await?;

        Ok(AnswerResponse {
            answer,
            sources: retrieved.iter().map(SourceChunk::from).collect(),
        })
    }

    /// Summarize the start of the document
    pub async fn summarize(&self) -> Result<String> {
        let input = self.pipeline_input()?;
        self.pipelines.summarize(input).await
    }

    /// Extract action items from the start of the document
    pub async fn extract_action_items(&self) -> Result<String> {
        let input = self.pipeline_input()?;
        self.pipelines.extract_action_items(input).await
    }

    fn pipeline_input(&self) -> Result<&str> {
        let session = self.current()?;
        Ok(char_prefix(&session.text, self.limits.input_char_limit))
    }
}

/// The first `n` characters of `text`
pub fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
