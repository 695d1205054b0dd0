//! Exact (brute force) Euclidean nearest-neighbour index

use crate::error::{Error, Result};
use crate::types::Chunk;

/// One indexed chunk and its embedding
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

/// A chunk returned from a query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// L2 distance to the query vector
    pub distance: f32,
}

/// Ordered entries of fixed dimension, searched exhaustively
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl FlatIndex {
    /// Build from entries that all share `dimensions`
    pub fn new(dimensions: usize, entries: Vec<IndexEntry>) -> Result<Self> {
        if let Some(bad) = entries.iter().find(|e| e.vector.len() != dimensions) {
            return Err(Error::embedding(format!(
                "chunk {} has {} dimensions, expected {}",
                bad.chunk.index,
                bad.vector.len(),
                dimensions
            )));
        }
        Ok(Self {
            dimensions,
            entries,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `min(k, len)` nearest entries, nearest first; ties keep chunk order
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if query.len() != self.dimensions {
            return Err(Error::embedding(format!(
                "query has {} dimensions, index has {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, euclidean_distance_squared(query, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, d)| ScoredChunk {
                chunk: self.entries[i].chunk.clone(),
                distance: d.sqrt(),
            })
            .collect())
    }
}

/// Squared L2 distance; callers guarantee equal lengths
pub fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
