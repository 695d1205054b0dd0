//! Image OCR through the tesseract command-line tool

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::OcrConfig;
use crate::error::{Error, Result};

use super::extractors::TextExtractor;

/// Runs `<binary> <image> stdout -l <language>`
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    binary: PathBuf,
    language: String,
}

impl TesseractOcr {
    /// Create from configuration. The binary is not checked until
    /// [`probe`](Self::probe) or the first extraction.
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.tesseract_path.clone(),
            language: config.language.clone(),
        }
    }

    /// Run `--version` and return its first line
    pub fn probe(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|_| self.unavailable())?;

        if !output.status.success() {
            return Err(self.unavailable());
        }

        // Older releases print the version banner on stderr
        let banner = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };
        Ok(String::from_utf8_lossy(&banner)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    fn unavailable(&self) -> Error {
        Error::OcrUnavailable(self.binary.display().to_string())
    }
}

impl TextExtractor for TesseractOcr {
    fn extract(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => self.unavailable(),
                _ => Error::extraction("image", format!("failed to run tesseract: {}", e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::extraction(
                "image",
                format!("tesseract exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            tracing::warn!("OCR produced no text from {}", path.display());
        } else {
            tracing::info!("Image OCR extracted {} characters", text.chars().count());
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ocr_with(binary: &str) -> TesseractOcr {
        TesseractOcr::new(&OcrConfig {
            tesseract_path: PathBuf::from(binary),
            language: "eng".into(),
        })
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let ocr = ocr_with("/nonexistent/bin/tesseract");
        let image = tempfile::Builder::new().suffix(".png").tempfile().unwrap();

        let err = ocr.extract(image.path()).unwrap_err();
        match err {
            Error::OcrUnavailable(path) => assert_eq!(path, "/nonexistent/bin/tesseract"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(ocr.probe(), Err(Error::OcrUnavailable(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_binary_is_extraction_error() {
        let ocr = ocr_with("false");
        let image = tempfile::Builder::new().suffix(".png").tempfile().unwrap();

        let err = ocr.extract(image.path()).unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
    }
}
