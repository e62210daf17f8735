//! Search command handler.

use super::source::CorpusSource;
use clap::Args;
use lexis_core::{config::AppConfig, AppResult};
use lexis_index::PREVIEW_CHARS;

/// Search a document or snapshot
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Free-text query
    pub query: String,

    #[command(flatten)]
    pub source: CorpusSource,

    /// Number of chunks to return (defaults to the configured top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Print full chunk text instead of a preview
    #[arg(long)]
    pub full: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");

        let store = self.source.load(config).await?;
        let top_k = self.top_k.unwrap_or(config.top_k);
        let response = lexis_index::search_with_total(&store, &self.query, top_k);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
            return Ok(());
        }

        if response.hits.is_empty() {
            println!("No matching chunks for {:?}", self.query);
            return Ok(());
        }

        println!(
            "{} of {} matching chunks:",
            response.hits.len(),
            response.total_found
        );
        for hit in &response.hits {
            let text = if self.full {
                hit.text.clone()
            } else {
                hit.preview(PREVIEW_CHARS)
            };
            println!();
            println!("[{}] similarity {:.4}", hit.chunk_index, hit.similarity);
            println!("{}", text);
        }

        Ok(())
    }
}
