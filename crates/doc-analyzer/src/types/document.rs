//! Document and chunk types

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Plain text file
    Txt,
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Image (for OCR) - requires tesseract
    Image,
}

impl FileType {
    /// Detect file type from extension (case-insensitive, without the dot).
    /// Returns `None` for anything the loader cannot handle.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "png" | "jpg" | "jpeg" => Some(Self::Image),
            _ => None,
        }
    }

    /// Extensions accepted by the loader
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] =
        &["txt", "pdf", "docx", "png", "jpg", "jpeg"];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Txt => "Text File",
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Image => "Image",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A contiguous segment of document text.
///
/// `start..end` is the byte range of `content` in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the chunk sequence
    pub index: usize,
    /// Chunk text
    pub content: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl Chunk {
    /// Number of characters (not bytes) in the chunk
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Text extracted from a file on disk
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Original filename
    pub filename: String,
    /// Format the text was extracted from
    pub file_type: FileType,
    /// Extracted text
    pub text: String,
}

impl LoadedDocument {
    /// SHA-256 of the extracted text, hex encoded
    pub fn content_hash(&self) -> String {
        hex::encode(Sha256::digest(self.text.as_bytes()))
    }
}

/// What a successful load reports back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Original filename
    pub filename: String,
    /// File type
    pub file_type: FileType,
    /// Characters of extracted text
    pub characters: usize,
    /// Number of chunks indexed
    pub chunks: usize,
    /// SHA-256 of the extracted text
    pub content_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("txt"), Some(FileType::Txt));
        assert_eq!(FileType::from_extension("PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("Docx"), Some(FileType::Docx));
        assert_eq!(FileType::from_extension("jpeg"), Some(FileType::Image));
        assert_eq!(FileType::from_extension("JPG"), Some(FileType::Image));
        assert_eq!(FileType::from_extension("png"), Some(FileType::Image));
        assert_eq!(FileType::from_extension("doc"), None);
        assert_eq!(FileType::from_extension("md"), None);
    }

    #[test]
    fn test_supported_extensions_all_resolve() {
        for ext in FileType::SUPPORTED_EXTENSIONS {
            assert!(FileType::from_extension(ext).is_some(), "{ext} should resolve");
        }
    }

    #[test]
    fn test_content_hash_is_stable() {
        let doc = LoadedDocument {
            filename: "a.txt".into(),
            file_type: FileType::Txt,
            text: "hello".into(),
        };
        assert_eq!(
            doc.content_hash(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }
}
