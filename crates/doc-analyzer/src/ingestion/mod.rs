//! Document ingestion: text extraction and chunking

mod chunker;
pub mod extractors;
mod loader;
pub mod ocr;

pub use chunker::TextChunker;
pub use extractors::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
pub use loader::DocumentLoader;
pub use ocr::TesseractOcr;
