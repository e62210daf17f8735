//! Retrieval type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token to relative frequency within one chunk or query.
pub type TermFrequencies = BTreeMap<String, f64>;

/// Sparse TF-IDF weights keyed by token. Zero weights are never stored.
pub type TfIdfVector = BTreeMap<String, f64>;

/// Token to unique integer id, assigned in first-seen order.
pub type Vocabulary = BTreeMap<String, u32>;

/// Token to inverse document frequency.
pub type IdfTable = BTreeMap<String, f64>;

/// A contiguous window of a document's cleaned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position within the corpus (0-indexed)
    pub index: usize,

    /// Text content
    pub text: String,

    /// Whitespace-delimited word count
    pub word_count: usize,

    /// Length of `text` in bytes
    pub byte_len: usize,
}

impl Chunk {
    pub fn new(index: usize, text: String) -> Self {
        let word_count = text.split_whitespace().count();
        let byte_len = text.len();
        Self {
            index,
            text,
            word_count,
            byte_len,
        }
    }
}

/// Bookkeeping for the document a corpus was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Filename hint supplied by the caller
    pub filename: String,

    /// Lower-cased extension of the filename, empty when there is none
    pub file_type: String,

    /// Size of the raw extracted text in bytes
    pub byte_count: u64,

    /// Number of chunks produced
    pub chunk_count: usize,

    /// When the document was processed
    pub processed_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(filename: &str, byte_count: u64, chunk_count: usize) -> Self {
        let file_type = std::path::Path::new(filename)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        Self {
            filename: filename.to_string(),
            file_type,
            byte_count,
            chunk_count,
            processed_at: Utc::now(),
        }
    }
}

/// Whether a corpus is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusStatus {
    Active,
    Empty,
}

/// Read-only summary of the active corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStatistics {
    /// Documents contributing to the corpus (0 or 1)
    pub total_documents: usize,

    /// Number of chunks
    pub total_chunks: usize,

    /// Whitespace words in the cleaned document text
    pub total_words: usize,

    /// Distinct indexed tokens
    pub vocabulary_size: usize,

    /// When the corpus was last built
    pub last_processed: Option<DateTime<Utc>>,

    /// Active or empty
    pub status: CorpusStatus,
}

/// Transferable copy of a corpus.
///
/// Everything needed to rebuild the store exactly. `document` may be absent;
/// every other field is required on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub document: Option<DocumentRecord>,
    pub chunks: Vec<Chunk>,
    pub vectors: Vec<TfIdfVector>,
    pub vocabulary: Vocabulary,
    pub idf: IdfTable,
    pub statistics: CorpusStatistics,
    pub exported_at: DateTime<Utc>,
}

/// Result of processing one document.
///
/// Failures are reported here instead of being propagated, so callers can
/// tell an empty upload apart from an internal fault via `error_kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub success: bool,
    pub filename: String,
    pub chunk_count: usize,
    pub vocabulary_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

/// One ranked chunk returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the chunk within the corpus
    pub chunk_index: usize,

    /// Full chunk text
    pub text: String,

    /// Cosine similarity, always in (0, 1]
    pub similarity: f64,
}

impl SearchHit {
    /// First `max_chars` characters of the text, with an ellipsis when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.text.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.text[..cut]),
            None => self.text.clone(),
        }
    }
}

/// Search hits plus the number of candidates before truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub total_found: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_lengths() {
        let chunk = Chunk::new(3, "três palavras aqui".to_string());
        assert_eq!(chunk.index, 3);
        assert_eq!(chunk.word_count, 3);
        assert_eq!(chunk.byte_len, "três palavras aqui".len());
    }

    #[test]
    fn test_document_record_file_type() {
        assert_eq!(DocumentRecord::new("Relatorio.PDF", 10, 1).file_type, ".pdf");
        assert_eq!(DocumentRecord::new("dados.csv", 10, 1).file_type, ".csv");
        assert_eq!(DocumentRecord::new("notes", 10, 1).file_type, "");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let hit = SearchHit {
            chunk_index: 0,
            text: "ação rápida".to_string(),
            similarity: 0.5,
        };
        assert_eq!(hit.preview(3), "açã...");
        assert_eq!(hit.preview(50), "ação rápida");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&CorpusStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }
}
