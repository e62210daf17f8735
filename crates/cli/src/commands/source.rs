//! Where a command gets its corpus from.
//!
//! The retrieval core never touches the filesystem; this module reads
//! extracted text and snapshot files on its behalf.

use clap::Args;
use lexis_core::{config::AppConfig, AppError, AppResult};
use lexis_index::{ChunkConfig, CorpusStore, Snapshot};
use std::path::{Path, PathBuf};

/// Corpus input shared by the read-only commands.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct CorpusSource {
    /// Plain-text document to index first
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Snapshot written by `lexis index --snapshot`
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl CorpusSource {
    /// Build a store holding the requested corpus.
    pub async fn load(&self, config: &AppConfig) -> AppResult<CorpusStore> {
        let store = CorpusStore::new();

        if let Some(path) = &self.text {
            index_text_file(&store, config, path, None).await?;
        } else if let Some(path) = &self.snapshot {
            let data = read_snapshot(path).await?;
            lexis_index::import_snapshot(&store, data)?;
        }

        Ok(store)
    }
}

/// Read a text file and make it the store's corpus.
///
/// `name` is recorded as the document's filename; the file name is used when
/// it is absent.
pub async fn index_text_file(
    store: &CorpusStore,
    config: &AppConfig,
    path: &Path,
    name: Option<&str>,
) -> AppResult<lexis_index::ProcessOutcome> {
    let raw_text = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Other(format!("Failed to read document {:?}: {}", path, e))
    })?;

    let filename = match name {
        Some(name) => name.to_string(),
        None => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    };

    let outcome = lexis_index::process(
        store,
        &ChunkConfig::from_app_config(config),
        &raw_text,
        &filename,
    );

    if !outcome.success {
        return Err(AppError::Other(format!(
            "Failed to index {:?}: {}",
            path,
            outcome.error.as_deref().unwrap_or("unknown error")
        )));
    }

    Ok(outcome)
}

/// Load snapshot JSON from disk.
pub async fn read_snapshot(path: &Path) -> AppResult<serde_json::Value> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Other(format!("Failed to read snapshot {:?}: {}", path, e))
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write a snapshot to disk as pretty JSON.
pub async fn write_snapshot(path: &Path, snapshot: &Snapshot) -> AppResult<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(path, json).await?;
    tracing::debug!("Wrote snapshot to {:?}", path);
    Ok(())
}
