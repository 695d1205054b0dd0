//! Sentence-aware text chunking with byte offset tracking

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};
use crate::types::Chunk;

/// Splits text into non-overlapping chunks of at most `max_chars` characters.
///
/// Sentences (Unicode sentence bounds, trailing whitespace included) are
/// packed greedily. A sentence longer than `max_chars` is split at character
/// boundaries. Concatenating the chunk contents yields the input unchanged.
#[derive(Debug, Clone)]
pub struct TextChunker {
    max_chars: usize,
}

/// Chunk being accumulated: byte range plus its character count
struct Pending {
    start: usize,
    end: usize,
    chars: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(max_chars: usize) -> Result<Self> {
        if max_chars == 0 {
            return Err(Error::invalid_input("chunk size must be greater than 0"));
        }
        Ok(Self { max_chars })
    }

    /// Maximum characters per chunk
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Chunk a text. Empty input produces no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut pending: Option<Pending> = None;

        for (offset, sentence) in text.split_sentence_bound_indices() {
            let sentence_chars = sentence.chars().count();
            let sentence_end = offset + sentence.len();

            if let Some(current) = pending.as_mut() {
                if current.chars + sentence_chars <= self.max_chars {
                    current.end = sentence_end;
                    current.chars += sentence_chars;
                    continue;
                }
            }

            if let Some(done) = pending.take() {
                self.push(&mut chunks, text, done);
            }

            if sentence_chars <= self.max_chars {
                pending = Some(Pending {
                    start: offset,
                    end: sentence_end,
                    chars: sentence_chars,
                });
                continue;
            }

            // Oversized sentence: emit full-width pieces, keep the tail open
            let mut piece_start = offset;
            let mut piece_chars = 0;
            for (i, _) in sentence.char_indices() {
                if piece_chars == self.max_chars {
                    let piece_end = offset + i;
                    self.push(
                        &mut chunks,
                        text,
                        Pending {
                            start: piece_start,
                            end: piece_end,
                            chars: piece_chars,
                        },
                    );
                    piece_start = piece_end;
                    piece_chars = 0;
                }
                piece_chars += 1;
            }
            pending = Some(Pending {
                start: piece_start,
                end: sentence_end,
                chars: piece_chars,
            });
        }

        if let Some(done) = pending {
            self.push(&mut chunks, text, done);
        }

        tracing::debug!(
            "Chunked {} bytes into {} chunks (max {} chars)",
            text.len(),
            chunks.len(),
            self.max_chars
        );

        chunks
    }

    fn push(&self, chunks: &mut Vec<Chunk>, text: &str, span: Pending) {
        debug_assert!(span.chars > 0 && span.chars <= self.max_chars);
        chunks.push(Chunk {
            index: chunks.len(),
            content: text[span.start..span.end].to_string(),
            start: span.start,
            end: span.end,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rebuild(chunks: &[Chunk]) -> String {
        chunks.iter().map(|c| c.content.as_str()).collect()
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(TextChunker::new(0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunker = TextChunker::new(500).unwrap();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = TextChunker::new(500).unwrap();
        let text = "Alice must finish the report by Friday.";
        let chunks = chunker.chunk(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
        assert_eq!((chunks[0].start, chunks[0].end), (0, text.len()));
    }

    #[test]
    fn test_sentences_are_packed_without_splitting() {
        let chunker = TextChunker::new(30).unwrap();
        let text = "One sentence here. Another one here. A third closes.";
        let chunks = chunker.chunk(text);

        assert_eq!(rebuild(&chunks), text);
        assert_eq!(chunks[0].content, "One sentence here. ");
        assert_eq!(chunks[1].content, "Another one here. ");
        assert_eq!(chunks[2].content, "A third closes.");
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert_eq!(&text[chunk.start..chunk.end], chunk.content);
        }
    }

    #[test]
    fn test_long_sentence_is_hard_split() {
        let chunker = TextChunker::new(10).unwrap();
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = chunker.chunk(text);

        let sizes: Vec<usize> = chunks.iter().map(Chunk::char_count).collect();
        assert_eq!(sizes, vec![10, 10, 6]);
        assert_eq!(rebuild(&chunks), text);
    }

    #[test]
    fn test_multibyte_offsets() {
        let chunker = TextChunker::new(4).unwrap();
        let text = "héllo wörld";
        let chunks = chunker.chunk(text);

        assert_eq!(rebuild(&chunks), text);
        for chunk in &chunks {
            assert!(chunk.char_count() <= 4);
            assert_eq!(&text[chunk.start..chunk.end], chunk.content);
        }
    }

    proptest! {
        #[test]
        fn prop_chunks_are_lossless_and_bounded(text in "\\PC{0,400}", max in 1usize..64) {
            let chunker = TextChunker::new(max).unwrap();
            let chunks = chunker.chunk(&text);

            prop_assert_eq!(rebuild(&chunks), text.clone());
            let mut expected_start = 0;
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.index, i);
                prop_assert_eq!(chunk.start, expected_start);
                let n = chunk.char_count();
                prop_assert!(n >= 1 && n <= max);
                expected_start = chunk.end;
            }
            prop_assert_eq!(expected_start, text.len());
        }
    }
}
