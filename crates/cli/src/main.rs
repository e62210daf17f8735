//! Lexis CLI
//!
//! Main entry point for the lexis command-line tool.
//! Indexes extracted document text and answers free-text queries with
//! TF-IDF ranked chunks.

mod commands;

use clap::{Parser, Subcommand};
use commands::{IndexCommand, SearchCommand, StatsCommand};
use lexis_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Lexis - TF-IDF retrieval over extracted document text
#[derive(Parser, Debug)]
#[command(name = "lexis")]
#[command(about = "TF-IDF retrieval over extracted document text", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "LEXIS_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "LEXIS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Words per chunk
    #[arg(long, global = true)]
    chunk_size: Option<usize>,

    /// Words shared by consecutive chunks
    #[arg(long, global = true)]
    chunk_overlap: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Index a plain-text document
    Index(IndexCommand),

    /// Search a document or snapshot
    Search(SearchCommand),

    /// Show corpus statistics
    Stats(StatsCommand),
}

/// Resolve configuration: defaults, then the config file, then environment
/// variables, then command-line flags.
fn load_config(cli: &Cli) -> AppResult<AppConfig> {
    Ok(
        AppConfig::load_from(cli.workspace.as_deref(), cli.config.as_deref())?.with_overrides(
            cli.workspace.clone(),
            cli.config.clone(),
            cli.log_level.clone(),
            cli.verbose,
            cli.no_color,
            cli.chunk_size,
            cli.chunk_overlap,
        ),
    )
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Lexis CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!(
        "Chunking: size {}, overlap {}",
        config.chunk_size,
        config.chunk_overlap
    );

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Index(_) => "index",
        Commands::Search(_) => "search",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Index(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::Path;
    use tempfile::TempDir;

    fn stats_cli(workspace: &Path, config: &Path, extra: &[&str]) -> Cli {
        let mut args: Vec<OsString> = vec![
            "lexis".into(),
            "--workspace".into(),
            workspace.into(),
            "--config".into(),
            config.into(),
        ];
        args.extend(extra.iter().map(OsString::from));
        args.extend(["stats", "--text", "doc.txt"].map(OsString::from));
        Cli::try_parse_from(args).unwrap()
    }

    fn write_chunking_config(temp: &TempDir) -> PathBuf {
        let path = temp.path().join("c.yaml");
        std::fs::write(&path, "retrieval:\n  chunkSize: 10\n  chunkOverlap: 2\n").unwrap();
        path
    }

    #[test]
    fn test_config_flag_file_sets_chunking() {
        let temp = TempDir::new().unwrap();
        let path = write_chunking_config(&temp);

        let config = load_config(&stats_cli(temp.path(), &path, &[])).unwrap();
        assert_eq!(config.config_file.as_deref(), Some(path.as_path()));
        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.chunk_overlap, 2);
    }

    #[test]
    fn test_chunk_flags_beat_config_file() {
        let temp = TempDir::new().unwrap();
        let path = write_chunking_config(&temp);

        let cli = stats_cli(temp.path(), &path, &["--chunk-size", "40"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.chunk_size, 40);
        assert_eq!(config.chunk_overlap, 2);
    }
}
