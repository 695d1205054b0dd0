//! Extension-based dispatch from a file path to its extractor

use std::path::Path;

use crate::config::OcrConfig;
use crate::error::{Error, Result};
use crate::types::{FileType, LoadedDocument};

use super::extractors::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use super::ocr::TesseractOcr;

/// Loads a document from disk using one extractor per supported format
pub struct DocumentLoader {
    text: Box<dyn TextExtractor>,
    pdf: Box<dyn TextExtractor>,
    docx: Box<dyn TextExtractor>,
    image: Box<dyn TextExtractor>,
}

impl DocumentLoader {
    /// Create a loader from explicit extractors
    pub fn new(
        text: Box<dyn TextExtractor>,
        pdf: Box<dyn TextExtractor>,
        docx: Box<dyn TextExtractor>,
        image: Box<dyn TextExtractor>,
    ) -> Self {
        Self {
            text,
            pdf,
            docx,
            image,
        }
    }

    /// Create a loader with the built-in extractors; images go through
    /// tesseract as configured
    pub fn with_ocr(ocr: TesseractOcr) -> Self {
        Self::new(
            Box::new(PlainTextExtractor),
            Box::new(PdfExtractor),
            Box::new(DocxExtractor),
            Box::new(ocr),
        )
    }

    /// Create a loader from OCR configuration
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::with_ocr(TesseractOcr::new(config))
    }

    /// Load a document, naming it after the path's file name
    pub fn load(&self, path: &Path) -> Result<LoadedDocument> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load_as(path, &filename)
    }

    /// Load a document under an explicit display name (uploads are read
    /// from a temp file but reported under the client's filename)
    pub fn load_as(&self, path: &Path, filename: &str) -> Result<LoadedDocument> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| Error::MissingExtension(path.to_path_buf()))?;

        let file_type = FileType::from_extension(&extension)
            .ok_or_else(|| Error::UnsupportedFormat(extension.clone()))?;

        tracing::info!("[{}] Extracting text as {}", filename, file_type);

        let extractor = match file_type {
            FileType::Txt => &self.text,
            FileType::Pdf => &self.pdf,
            FileType::Docx => &self.docx,
            FileType::Image => &self.image,
        };
        let text = extractor.extract(path)?;

        tracing::debug!("[{}] Extracted {} characters", filename, text.chars().count());

        Ok(LoadedDocument {
            filename: filename.to_string(),
            file_type,
            text,
        })
    }
}
