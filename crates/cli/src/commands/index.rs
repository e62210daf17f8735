//! Index command handler.
//!
//! Processes a plain-text document and optionally writes a snapshot.

use super::source::{index_text_file, write_snapshot};
use clap::Args;
use lexis_core::{config::AppConfig, AppResult};
use lexis_index::CorpusStore;
use std::path::PathBuf;

/// Index a plain-text document
#[derive(Args, Debug)]
pub struct IndexCommand {
    /// Extracted text of the document
    pub path: PathBuf,

    /// Filename to record for the document (defaults to the file's name)
    #[arg(long)]
    pub name: Option<String>,

    /// Write the resulting corpus snapshot to this file
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IndexCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing index command for {:?}", self.path);

        let store = CorpusStore::new();
        let outcome = index_text_file(&store, config, &self.path, self.name.as_deref()).await?;

        if let Some(ref snapshot_path) = self.snapshot {
            write_snapshot(snapshot_path, &lexis_index::export_snapshot(&store)).await?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            println!(
                "Indexed {} ({} chunks, {} distinct terms)",
                outcome.filename, outcome.chunk_count, outcome.vocabulary_size
            );
            if let Some(ref snapshot_path) = self.snapshot {
                println!("Snapshot written to {}", snapshot_path.display());
            }
        }

        Ok(())
    }
}
