//! Similarity ranking of chunk vectors against a query vector.

use crate::types::TfIdfVector;
use crate::vector::cosine_similarity;
use serde::{Deserialize, Serialize};

/// A chunk position paired with its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedChunk {
    pub chunk_index: usize,
    pub similarity: f64,
}

/// Score every chunk and keep only positive similarities, best first.
///
/// Equal similarities are ordered by ascending chunk index.
pub fn rank_all(query: &TfIdfVector, chunk_vectors: &[TfIdfVector]) -> Vec<RankedChunk> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedChunk> = chunk_vectors
        .iter()
        .enumerate()
        .filter_map(|(chunk_index, vector)| {
            let similarity = cosine_similarity(query, vector);
            (similarity > 0.0).then_some(RankedChunk {
                chunk_index,
                similarity,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then(a.chunk_index.cmp(&b.chunk_index))
    });

    ranked
}

/// The `top_k` best chunks for `query`.
pub fn rank(query: &TfIdfVector, chunk_vectors: &[TfIdfVector], top_k: usize) -> Vec<RankedChunk> {
    let mut ranked = rank_all(query, chunk_vectors);
    ranked.truncate(top_k);
    ranked
}
