//! Deed Archive - command line entry point
//!
//! Subcommands cover the whole pipeline: extraction from scans, loading the
//! reviewed CSV into the index, searching, transcript comparison, and serving
//! the archive over MCP.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deed_archive::client::{AsyncSearchClient, AsyncSearchClientImpl};
use deed_archive::repositories::{image_paths, ProcessOutcome};
use deed_archive::search::render_hits;
use deed_archive::{
    compare_transcripts, AnthropicClient, Config, DeedAnalyzer, DeedArchiveServer, ElasticClient,
    ExtractionStore, IndexerService, Metrics, SearchIndex, SearchParams, SearchService,
    SearchServiceImpl,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deeds", version, about = "Extract, index and search scanned land deeds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract structured records from deed images (files or directories)
    Extract {
        /// Directory for the per-document JSON records
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Load a reviewed deed CSV into the search index
    Index {
        csv: PathBuf,
        /// Index name (default from INDEX_NAME)
        #[arg(long)]
        index: Option<String>,
    },
    /// Search the deed index
    Search {
        /// Search term; omit to match every document
        term: Option<String>,
        /// Field to search (e.g. "Grantors", "city", "execution_date")
        #[arg(long)]
        field: Option<String>,
        /// exact or fuzzy
        #[arg(long)]
        mode: Option<String>,
        /// Earliest date, YYYY-MM-DD
        #[arg(long)]
        start_date: Option<String>,
        /// Latest date, YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Compare two transcript files word by word
    Compare { first: PathBuf, second: PathBuf },
    /// Serve search and extraction lookups over MCP (stdio)
    Serve,
}

fn init_logging(default_level: &str) {
    // stderr only; stdout carries results and the MCP transport
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Comparing transcripts needs no configuration
    let command = match cli.command {
        Command::Compare { first, second } => {
            init_logging("info");
            return run_compare(&first, &second);
        }
        command => command,
    };

    let config = match Config::from_env() {
        Ok(cfg) => {
            init_logging(&cfg.log_level);
            cfg
        }
        Err(e) => {
            init_logging("info");
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let metrics = Metrics::new();

    match command {
        Command::Extract { output_dir, paths } => {
            run_extract(&config, metrics.clone(), output_dir, &paths)?
        }
        Command::Index { csv, index } => run_index(&config, metrics.clone(), &csv, index)?,
        Command::Search {
            term,
            field,
            mode,
            start_date,
            end_date,
        } => {
            let params = SearchParams {
                term,
                field,
                mode,
                start_date,
                end_date,
            };
            run_search(&config, metrics.clone(), params).await?
        }
        Command::Compare { .. } => unreachable!("handled before configuration is loaded"),
        Command::Serve => run_serve(&config, metrics.clone()).await?,
    }

    info!("{}", metrics.summary());
    Ok(())
}

fn run_compare(first: &Path, second: &Path) -> Result<()> {
    let first_text = std::fs::read_to_string(first)
        .with_context(|| format!("Failed to read {}", first.display()))?;
    let second_text = std::fs::read_to_string(second)
        .with_context(|| format!("Failed to read {}", second.display()))?;
    println!("{}", compare_transcripts(&first_text, &second_text));
    Ok(())
}

fn run_extract(
    config: &Config,
    metrics: Metrics,
    output_dir: Option<PathBuf>,
    paths: &[PathBuf],
) -> Result<()> {
    let client = AnthropicClient::new(config, metrics.clone())?;
    let analyzer = DeedAnalyzer::new(client);
    let store = ExtractionStore::new(
        output_dir.unwrap_or_else(|| config.output_dir.clone()),
        metrics,
    );

    let images = image_paths(paths)?;
    info!(
        "Extracting {} images into {}",
        images.len(),
        store.output_dir().display()
    );

    let outcomes = store.process_all(&images, &analyzer)?;
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, ProcessOutcome::Skipped(_)))
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, ProcessOutcome::Stored { parse_failed: true, .. }))
        .count();
    info!(
        "Extraction finished: {} stored, {} skipped, {} unparseable",
        outcomes.len() - skipped,
        skipped,
        failed
    );
    Ok(())
}

fn run_index(
    config: &Config,
    metrics: Metrics,
    csv: &std::path::Path,
    index: Option<String>,
) -> Result<()> {
    let client = Arc::new(ElasticClient::new(config, metrics.clone())?) as Arc<dyn SearchIndex>;
    let indexer = IndexerService::new(
        client,
        index.unwrap_or_else(|| config.index_name.clone()),
        metrics,
    );

    let summary = indexer.load_csv(csv)?;
    if summary.failed > 0 {
        error!("{} documents failed to index", summary.failed);
    }
    Ok(())
}

fn search_service(config: &Config, metrics: Metrics) -> Result<Arc<dyn SearchService>> {
    let index = Arc::new(ElasticClient::new(config, metrics)?) as Arc<dyn SearchIndex>;
    let client = Arc::new(AsyncSearchClientImpl::new(index)) as Arc<dyn AsyncSearchClient>;
    let service = SearchServiceImpl::new(client, config.index_name.clone(), config.max_search_hits);
    Ok(Arc::new(service) as Arc<dyn SearchService>)
}

async fn run_search(config: &Config, metrics: Metrics, params: SearchParams) -> Result<()> {
    let service = search_service(config, metrics)?;
    let hits = service.search_params(&params).await?;
    print!("{}", render_hits(&hits, &config.image_dir));
    Ok(())
}

async fn run_serve(config: &Config, metrics: Metrics) -> Result<()> {
    let service = search_service(config, metrics.clone())?;
    let store = Arc::new(ExtractionStore::new(config.output_dir.clone(), metrics));
    let server = DeedArchiveServer::new(service, store, config.image_dir.clone());

    info!("Starting MCP server with stdio transport");
    deed_archive::server::run_server(server).await?;

    info!("Deed archive MCP server shutdown complete");
    Ok(())
}
