//! Document retrieval core.
//!
//! Cleans extracted text, cuts it into word windows, weights every chunk with
//! TF-IDF and answers free-text queries with chunks ranked by cosine
//! similarity. Everything is in memory and deterministic; reading files,
//! persistence and answer generation belong to the callers.
//!
//! The operations below all take the `CorpusStore` they act on. Processing a
//! document replaces the whole corpus.

pub mod chunker;
pub mod config;
pub mod rank;
pub mod stats;
pub mod store;
pub mod tokenizer;
pub mod types;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use config::ChunkConfig;
pub use store::{Corpus, CorpusStore};
pub use types::{
    Chunk, CorpusStatistics, CorpusStatus, DocumentRecord, ProcessOutcome, SearchHit,
    SearchResponse, Snapshot,
};

use lexis_core::{AppError, AppResult};
use std::time::Instant;

/// Number of chunks handed to an answer generator as context.
pub const ANSWER_CONTEXT_TOP_K: usize = 3;

/// Characters shown when a hit is previewed.
pub const PREVIEW_CHARS: usize = 200;

/// Process one document's extracted text and make it the active corpus.
///
/// The new corpus is built completely before it replaces the old one, so
/// a failure leaves the previous corpus in place. `filename` is only
/// recorded, never used to decide how the text is read.
pub fn process(
    store: &CorpusStore,
    config: &ChunkConfig,
    raw_text: &str,
    filename: &str,
) -> ProcessOutcome {
    tracing::info!("Processing document '{}'", filename);
    let start = Instant::now();

    match build_corpus(config, raw_text, filename) {
        Ok(corpus) => {
            let chunk_count = corpus.chunks().len();
            let vocabulary_size = corpus.vocabulary().len();
            store.replace(corpus);

            tracing::info!(
                "Processed '{}': {} chunks, {} distinct tokens in {:.3}s",
                filename,
                chunk_count,
                vocabulary_size,
                start.elapsed().as_secs_f64()
            );

            ProcessOutcome {
                success: true,
                filename: filename.to_string(),
                chunk_count,
                vocabulary_size,
                error: None,
                error_kind: None,
            }
        }
        Err(e) => {
            tracing::error!("Failed to process '{}': {}", filename, e);

            ProcessOutcome {
                success: false,
                filename: filename.to_string(),
                chunk_count: 0,
                vocabulary_size: 0,
                error: Some(e.to_string()),
                error_kind: Some(e.kind().to_string()),
            }
        }
    }
}

/// Clean, chunk and index a document without touching any store.
pub fn build_corpus(config: &ChunkConfig, raw_text: &str, filename: &str) -> AppResult<Corpus> {
    config.validate()?;

    if raw_text.trim().is_empty() {
        return Err(AppError::EmptyInput(format!(
            "no text was extracted from '{}'",
            filename
        )));
    }

    let cleaned = tokenizer::clean_text(raw_text, config.min_line_chars);
    let total_words = cleaned.split_whitespace().count();

    let chunks = chunker::split(&cleaned, config)?;
    if chunks.is_empty() {
        return Err(AppError::EmptyInput(format!(
            "no chunks were produced from '{}'",
            filename
        )));
    }

    let document = DocumentRecord::new(filename, raw_text.len() as u64, chunks.len());
    let corpus = Corpus::build(chunks, Some(document), total_words);

    if corpus.vocabulary().is_empty() {
        return Err(AppError::EmptyInput(format!(
            "'{}' contains no indexable words",
            filename
        )));
    }

    Ok(corpus)
}

/// Rank the active corpus against `query` and return the `top_k` best hits.
///
/// A query with no indexed words returns an empty list, not an error.
pub fn search(store: &CorpusStore, query: &str, top_k: usize) -> Vec<SearchHit> {
    search_with_total(store, query, top_k).hits
}

/// Like [`search`], also reporting how many chunks matched before truncation.
pub fn search_with_total(store: &CorpusStore, query: &str, top_k: usize) -> SearchResponse {
    let corpus = store.current();

    if corpus.is_empty() {
        tracing::warn!("Search on an empty corpus");
        return SearchResponse {
            query: query.to_string(),
            hits: Vec::new(),
            total_found: 0,
        };
    }

    let ranked = corpus.rank_query(query);
    if ranked.is_empty() {
        tracing::debug!("No chunk shares an indexed word with {:?}", query);
    }

    let total_found = ranked.len();
    let hits: Vec<SearchHit> = ranked
        .into_iter()
        .take(top_k)
        .map(|r| SearchHit {
            chunk_index: r.chunk_index,
            text: corpus.chunks()[r.chunk_index].text.clone(),
            similarity: r.similarity,
        })
        .collect();

    tracing::info!(
        "Search returned {} of {} matching chunks",
        hits.len(),
        total_found
    );

    SearchResponse {
        query: query.to_string(),
        hits,
        total_found,
    }
}

/// The chunks an answer generator should see for `query`.
pub fn answer_context(store: &CorpusStore, query: &str) -> Vec<SearchHit> {
    search(store, query, ANSWER_CONTEXT_TOP_K)
}

/// Summary of the active corpus.
pub fn get_statistics(store: &CorpusStore) -> CorpusStatistics {
    store.statistics()
}

/// Transferable copy of the active corpus.
pub fn export_snapshot(store: &CorpusStore) -> Snapshot {
    store.export()
}

/// Restore the corpus from untyped snapshot data.
///
/// On failure the active corpus is left exactly as it was.
pub fn import_snapshot(store: &CorpusStore, data: serde_json::Value) -> AppResult<()> {
    store.import_value(data)
}

/// Drop the active corpus.
pub fn clear(store: &CorpusStore) {
    store.clear();
}
