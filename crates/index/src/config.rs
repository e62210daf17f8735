//! Chunking configuration.

use lexis_core::{AppConfig, AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Controls how cleaned text is cut into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Words per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Words shared by consecutive chunks; must be below `chunk_size`
    #[serde(default = "default_overlap")]
    pub overlap: usize,

    /// Windowed chunks with this many characters or fewer are dropped
    #[serde(default = "default_min_chunk_chars")]
    pub min_chunk_chars: usize,

    /// Cleaned lines with this many characters or fewer are dropped
    #[serde(default = "default_min_line_chars")]
    pub min_line_chars: usize,
}

fn default_chunk_size() -> usize {
    lexis_core::config::DEFAULT_CHUNK_SIZE
}

fn default_overlap() -> usize {
    lexis_core::config::DEFAULT_CHUNK_OVERLAP
}

fn default_min_chunk_chars() -> usize {
    50
}

fn default_min_line_chars() -> usize {
    10
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
            min_chunk_chars: default_min_chunk_chars(),
            min_line_chars: default_min_line_chars(),
        }
    }
}

impl ChunkConfig {
    /// Config with the given window and the default noise thresholds.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            ..Default::default()
        }
    }

    /// Build from the application-level retrieval settings.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Reject configurations whose window could never advance.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::InvalidChunkConfig(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(AppError::InvalidChunkConfig(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Words the window advances per step. Only meaningful after `validate`.
    pub(crate) fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}
