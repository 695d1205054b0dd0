//! Application state for the analyzer server

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::analyzer::DocumentAnalyzer;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::ingestion::{DocumentLoader, TesseractOcr};
use crate::providers::build_providers;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AnalyzerConfig,
    /// The single analysis session; the lock serialises every request touching it
    analyzer: Mutex<DocumentAnalyzer>,
    /// Tesseract version banner, if the startup probe succeeded
    ocr_version: Option<String>,
}

impl AppState {
    /// Wrap an already constructed analyzer
    pub fn new(config: AnalyzerConfig, analyzer: DocumentAnalyzer, ocr_version: Option<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                analyzer: Mutex::new(analyzer),
                ocr_version,
            }),
        }
    }

    /// Build providers, probe OCR and assemble the analyzer
    pub async fn from_config(config: AnalyzerConfig) -> Result<Self> {
        tracing::info!("Initializing analyzer state...");

        let ocr = TesseractOcr::new(&config.ocr);
        let ocr_version = match ocr.probe() {
            Ok(version) => {
                tracing::info!("OCR available: {}", version);
                Some(version)
            }
            Err(e) => {
                tracing::warn!("{}; image uploads will fail", e);
                None
            }
        };

        let (embedder, generator) = build_providers(&config).await?;

        for (name, healthy) in [
            (embedder.name().to_string(), embedder.health_check().await?),
            (generator.name().to_string(), generator.health_check().await?),
        ] {
            if !healthy {
                tracing::warn!(
                    "{} backend not reachable at {}; requests will fail until it is up",
                    name,
                    config.llm.base_url
                );
            }
        }

        let analyzer =
            DocumentAnalyzer::new(&config, DocumentLoader::with_ocr(ocr), embedder, generator)?;

        Ok(Self::new(config, analyzer, ocr_version))
    }

    /// Get configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.inner.config
    }

    /// Lock the analyzer for the duration of one request
    pub async fn analyzer(&self) -> MutexGuard<'_, DocumentAnalyzer> {
        self.inner.analyzer.lock().await
    }

    /// Whether image OCR is usable
    pub fn ocr_version(&self) -> Option<&str> {
        self.inner.ocr_version.as_deref()
    }
}
