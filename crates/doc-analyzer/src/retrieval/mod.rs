//! Semantic retrieval over document chunks

mod flat;
mod indexer;

pub use flat::{euclidean_distance_squared, FlatIndex, IndexEntry, ScoredChunk};
pub use indexer::EmbeddingIndexer;
