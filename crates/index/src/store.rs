//! In-memory corpus and the store that publishes it.
//!
//! A `Corpus` is immutable once built. `CorpusStore` holds the active one
//! behind an `Arc` and swaps it wholesale, so a reader holding a handle
//! always sees one complete corpus, never a mix of old and new parts.

use crate::rank::{rank_all, RankedChunk};
use crate::stats::{build_index, term_frequencies};
use crate::tokenizer::tokenize;
use crate::types::{
    Chunk, CorpusStatistics, CorpusStatus, DocumentRecord, IdfTable, Snapshot, TfIdfVector,
    Vocabulary,
};
use crate::vector::vectorize;
use chrono::{DateTime, Utc};
use lexis_core::{AppError, AppResult};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// Chunks plus the index structures derived from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    document: Option<DocumentRecord>,
    chunks: Vec<Chunk>,
    /// Index-aligned with `chunks`
    vectors: Vec<TfIdfVector>,
    vocabulary: Vocabulary,
    idf: IdfTable,
    total_words: usize,
    last_processed: Option<DateTime<Utc>>,
}

impl Corpus {
    /// A corpus with no chunks.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index `chunk_texts` from scratch.
    ///
    /// `total_words` is the word count of the cleaned source text, which
    /// differs from the sum of chunk lengths when chunks overlap.
    pub fn build(
        chunk_texts: Vec<String>,
        document: Option<DocumentRecord>,
        total_words: usize,
    ) -> Self {
        let index = build_index(chunk_texts.as_slice());

        let vectors = index
            .term_frequencies
            .iter()
            .map(|tf| vectorize(tf, &index.idf))
            .collect();

        let chunks = chunk_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(i, text))
            .collect();

        let last_processed = Some(
            document
                .as_ref()
                .map(|doc| doc.processed_at)
                .unwrap_or_else(Utc::now),
        );

        Self {
            document,
            chunks,
            vectors,
            vocabulary: index.vocabulary,
            idf: index.idf,
            total_words,
            last_processed,
        }
    }

    pub fn document(&self) -> Option<&DocumentRecord> {
        self.document.as_ref()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn vectors(&self) -> &[TfIdfVector] {
        &self.vectors
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Vectorize a query against this corpus's IDF table.
    pub fn query_vector(&self, query: &str) -> TfIdfVector {
        let tokens = tokenize(query);
        vectorize(&term_frequencies(tokens.as_slice()), &self.idf)
    }

    /// Every chunk with positive similarity to `query`, best first.
    pub fn rank_query(&self, query: &str) -> Vec<RankedChunk> {
        rank_all(&self.query_vector(query), &self.vectors)
    }

    /// Derived summary, never stored separately.
    pub fn statistics(&self) -> CorpusStatistics {
        CorpusStatistics {
            total_documents: usize::from(self.document.is_some()),
            total_chunks: self.chunks.len(),
            total_words: self.total_words,
            vocabulary_size: self.vocabulary.len(),
            last_processed: self.last_processed,
            status: if self.is_empty() {
                CorpusStatus::Empty
            } else {
                CorpusStatus::Active
            },
        }
    }

    /// Complete copy suitable for serialization.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            chunks: self.chunks.clone(),
            vectors: self.vectors.clone(),
            vocabulary: self.vocabulary.clone(),
            idf: self.idf.clone(),
            statistics: self.statistics(),
            exported_at: Utc::now(),
        }
    }

    /// Rebuild a corpus from a snapshot, rejecting inconsistent data.
    pub fn from_snapshot(snapshot: Snapshot) -> AppResult<Self> {
        validate_snapshot(&snapshot).map_err(AppError::ImportValidation)?;

        Ok(Self {
            document: snapshot.document,
            chunks: snapshot.chunks,
            vectors: snapshot.vectors,
            vocabulary: snapshot.vocabulary,
            idf: snapshot.idf,
            total_words: snapshot.statistics.total_words,
            last_processed: snapshot.statistics.last_processed,
        })
    }
}

fn validate_snapshot(snapshot: &Snapshot) -> Result<(), String> {
    let chunk_count = snapshot.chunks.len();

    if snapshot.vectors.len() != chunk_count {
        return Err(format!(
            "{} vectors for {} chunks",
            snapshot.vectors.len(),
            chunk_count
        ));
    }

    for (position, chunk) in snapshot.chunks.iter().enumerate() {
        if chunk.index != position {
            return Err(format!(
                "chunk at position {} has index {}",
                position, chunk.index
            ));
        }
        if chunk.byte_len != chunk.text.len() {
            return Err(format!("chunk {} has a stale byte length", position));
        }
    }

    let ids: HashSet<u32> = snapshot.vocabulary.values().copied().collect();
    if ids.len() != snapshot.vocabulary.len() {
        return Err("vocabulary ids are not unique".to_string());
    }

    for (token, weight) in &snapshot.idf {
        if !snapshot.vocabulary.contains_key(token) {
            return Err(format!("idf entry {:?} is not in the vocabulary", token));
        }
        if !weight.is_finite() || *weight < 0.0 {
            return Err(format!("idf entry {:?} has invalid weight {}", token, weight));
        }
    }

    for (position, vector) in snapshot.vectors.iter().enumerate() {
        for (token, weight) in vector {
            if !snapshot.idf.contains_key(token) {
                return Err(format!(
                    "vector {} references unknown token {:?}",
                    position, token
                ));
            }
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(format!(
                    "vector {} has invalid weight {} for {:?}",
                    position, weight, token
                ));
            }
        }
    }

    let stats = &snapshot.statistics;
    if stats.total_chunks != chunk_count || stats.vocabulary_size != snapshot.vocabulary.len() {
        return Err("statistics do not match the snapshot contents".to_string());
    }

    if let Some(document) = &snapshot.document {
        if document.chunk_count != chunk_count {
            return Err(format!(
                "document {:?} records {} chunks, snapshot has {}",
                document.filename, document.chunk_count, chunk_count
            ));
        }
    }

    Ok(())
}

/// Holder of the single active corpus.
///
/// Built corpora are published with one pointer swap under a write lock.
/// Readers clone the `Arc` and work on that handle without holding the lock.
#[derive(Debug, Default)]
pub struct CorpusStore {
    current: RwLock<Arc<Corpus>>,
}

impl CorpusStore {
    /// Create a store holding the empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the active corpus.
    pub fn current(&self) -> Arc<Corpus> {
        self.current.read().clone()
    }

    /// Swap in a fully built corpus, discarding the previous one.
    pub fn replace(&self, corpus: Corpus) {
        let corpus = Arc::new(corpus);
        *self.current.write() = corpus;
    }

    /// Serializable copy of the active corpus.
    pub fn export(&self) -> Snapshot {
        self.current().to_snapshot()
    }

    /// Restore from a typed snapshot. On error the active corpus is kept.
    pub fn import(&self, snapshot: Snapshot) -> AppResult<()> {
        let corpus = Corpus::from_snapshot(snapshot).inspect_err(|e| {
            tracing::warn!("Rejected snapshot: {}", e);
        })?;

        tracing::info!("Imported snapshot: {} chunks", corpus.chunks().len());
        self.replace(corpus);
        Ok(())
    }

    /// Restore from untyped data, e.g. a parsed JSON document.
    ///
    /// Missing or mistyped fields are reported as `ImportValidation`.
    pub fn import_value(&self, data: serde_json::Value) -> AppResult<()> {
        let snapshot: Snapshot = serde_json::from_value(data).map_err(|e| {
            tracing::warn!("Rejected snapshot: {}", e);
            AppError::ImportValidation(e.to_string())
        })?;
        self.import(snapshot)
    }

    /// Reset to the empty corpus.
    pub fn clear(&self) {
        self.replace(Corpus::empty());
        tracing::info!("Corpus cleared");
    }

    pub fn statistics(&self) -> CorpusStatistics {
        self.current().statistics()
    }
}
