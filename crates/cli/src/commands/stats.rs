//! Stats command handler.
//!
//! Handles corpus statistics display.

use super::source::CorpusSource;
use clap::Args;
use lexis_core::{config::AppConfig, AppResult};

/// Show corpus statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    #[command(flatten)]
    pub source: CorpusSource,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let store = self.source.load(config).await?;
        let stats = lexis_index::get_statistics(&store);
        let document = store.current().document().cloned();

        if self.json {
            let output = serde_json::json!({
                "document": document,
                "statistics": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            if let Some(document) = document {
                println!("Document: {} ({} bytes)", document.filename, document.byte_count);
            }
            println!("  Status: {:?}", stats.status);
            println!("  Documents: {}", stats.total_documents);
            println!("  Chunks: {}", stats.total_chunks);
            println!("  Words: {}", stats.total_words);
            println!("  Vocabulary: {}", stats.vocabulary_size);
            if let Some(last) = stats.last_processed {
                println!("  Last processed: {}", last);
            }
        }

        Ok(())
    }
}
