//! Word-window chunking with configurable size and overlap.

use crate::config::ChunkConfig;
use lexis_core::AppResult;

/// Split cleaned text into overlapping windows of whitespace-delimited words.
///
/// Text with at most `chunk_size` words comes back whole as a single chunk.
/// Longer text is cut into windows of `chunk_size` words that advance by
/// `chunk_size - overlap`; windows of `min_chunk_chars` characters or fewer
/// are dropped. The last window always ends at the final word.
///
/// Fails with `InvalidChunkConfig` before touching the text if the window
/// could not advance.
pub fn split(text: &str, config: &ChunkConfig) -> AppResult<Vec<String>> {
    config.validate()?;

    let words: Vec<&str> = text.split_whitespace().collect();

    if words.is_empty() {
        return Ok(vec![]);
    }

    if words.len() <= config.chunk_size {
        return Ok(vec![text.trim().to_string()]);
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + config.chunk_size).min(words.len());
        let chunk = words[start..end].join(" ");

        if chunk.trim().chars().count() > config.min_chunk_chars {
            chunks.push(chunk);
        }

        if end == words.len() {
            break;
        }
        start += config.step();
    }

    tracing::debug!(
        "Chunked {} words into {} chunks (size: {}, overlap: {})",
        words.len(),
        chunks.len(),
        config.chunk_size,
        config.overlap
    );

    Ok(chunks)
}
