//! Format-specific text extractors

use std::path::Path;

use crate::error::{Error, Result};

/// Pulls plain text out of a file of one format
#[cfg_attr(test, mockall::automock)]
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of the file at `path`
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Plain UTF-8 text; invalid sequences are replaced rather than rejected
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

/// PDF page text, in page order
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    fn extract_with_lopdf(path: &Path) -> Result<String> {
        let doc = lopdf::Document::load(path)
            .map_err(|e| Error::extraction("pdf", format!("Failed to load PDF: {}", e)))?;

        let mut text = String::new();
        for page_number in doc.get_pages().keys() {
            let page_text = doc.extract_text(&[*page_number]).map_err(|e| {
                Error::extraction("pdf", format!("page {}: {}", page_number, e))
            })?;
            text.push_str(&page_text);
        }
        Ok(text)
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let raw = match Self::extract_with_lopdf(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("lopdf extraction failed ({}), trying pdf-extract", e);
                pdf_extract::extract_text(path)
                    .map_err(|e| Error::extraction("pdf", e.to_string()))?
            }
        };

        let text = cleanup_pdf_text(&raw);
        if text.trim().is_empty() {
            tracing::warn!(
                "No text layer found in {}; scanned PDFs are not OCR'd",
                path.display()
            );
        }
        Ok(text)
    }
}

/// Normalise artefacts PDF text layers commonly carry
fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .replace("\r\n", "\n")
        .replace('\u{00A0}', " ")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
}

/// DOCX body paragraphs joined by newlines
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path)?;
        let doc = docx_rs::read_docx(&data)
            .map_err(|e| Error::extraction("docx", e.to_string()))?;

        let mut paragraphs = Vec::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                let mut line = String::new();
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                line.push_str(&t.text);
                            }
                        }
                    }
                }
                paragraphs.push(line);
            }
        }

        Ok(paragraphs.join("\n"))
    }
}
