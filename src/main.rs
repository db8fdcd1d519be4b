//! Lantern main entry point
//!
//! Command-line interface for the snapshot and retrieval pipeline. The
//! default mode starts the background refresh scheduler and answers
//! questions from stdin with assembled context.

use anyhow::Context;
use clap::Parser;
use lantern::config::load_config_with_hash;
use lantern::{
    GuideEngine, MemoryStore, RefreshScheduler, SiteCrawler, SnapshotSource, TieredCache,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Lantern: a site snapshot and retrieval pipeline for event guide bots
///
/// Lantern crawls a promotional event website on a schedule, caches the
/// snapshot in two TTL-governed tiers, and assembles bounded, relevance
/// ranked context strings for questions about the event.
#[derive(Parser, Debug)]
#[command(name = "lantern")]
#[command(version = "1.0.0")]
#[command(about = "Event site snapshot and retrieval pipeline", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would run, without crawling
    #[arg(long, conflicts_with_all = ["crawl_once", "ask"])]
    dry_run: bool,

    /// Run a single crawl, print per-page stats, and exit
    #[arg(long, conflicts_with_all = ["dry_run", "ask"])]
    crawl_once: bool,

    /// Answer one question with assembled context and exit
    #[arg(long, value_name = "QUESTION", conflicts_with_all = ["dry_run", "crawl_once"])]
    ask: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let crawler = Arc::new(SiteCrawler::new(&config.site)?);

    if cli.crawl_once {
        return handle_crawl_once(&crawler).await;
    }

    // The in-process store backs single-node runs; a networked store
    // implements the same SharedStore trait.
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(TieredCache::new(
        store,
        Arc::clone(&crawler),
        config.cache.store_key.clone(),
        config.cache.ttl_seconds,
    ));
    let engine = GuideEngine::new(Arc::clone(&cache), config.retrieval.clone());

    if let Some(question) = cli.ask {
        let reply = engine.context_for(&question).await.into_reply_text();
        println!("{}", reply);
        return Ok(());
    }

    // Default mode: background refresh plus a stdin question loop
    let scheduler = Arc::new(RefreshScheduler::new(
        cache,
        crawler,
        Duration::from_secs(config.scheduler.refresh_interval_minutes * 60),
    ));
    let cancel = CancellationToken::new();
    scheduler.start(cancel.clone());

    let result = run_console(&engine).await;
    cancel.cancel();
    result
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lantern=info,warn"),
            1 => EnvFilter::new("lantern=debug,info"),
            2 => EnvFilter::new("lantern=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: prints the effective configuration
fn handle_dry_run(config: &lantern::Config) {
    println!("=== Lantern Dry Run ===\n");

    println!("Site:");
    println!("  Seed URL: {}", config.site.seed_url);
    println!("  User agent: {}", config.site.user_agent);
    println!("  Fetch timeout: {}s", config.site.fetch_timeout_seconds);
    println!("  Fetch concurrency: {}", config.site.fetch_concurrency);

    println!("\nCache:");
    println!("  TTL: {}s", config.cache.ttl_seconds);
    println!("  Store key: {}", config.cache.store_key);

    println!("\nScheduler:");
    println!(
        "  Refresh interval: {} minutes",
        config.scheduler.refresh_interval_minutes
    );

    println!("\nRetrieval:");
    println!("  Char budget: {}", config.retrieval.char_budget);
    println!("  Top K: {}", config.retrieval.top_k);
    println!("  Coverage weight: {}", config.retrieval.coverage_weight);
    println!(
        "  Header bonus weight: {}",
        config.retrieval.header_bonus_weight
    );
    println!(
        "  Header window: {} chars",
        config.retrieval.header_window_chars
    );

    println!("\n✓ Configuration is valid");
}

/// Handles --crawl-once: runs a single crawl and prints per-page stats
async fn handle_crawl_once(crawler: &SiteCrawler) -> anyhow::Result<()> {
    let pages = crawler.snapshot().await.context("crawl failed")?;

    println!("Crawled {} pages:", pages.len());
    for page in pages.pages() {
        println!("  {} ({} chars)", page.url, page.content.chars().count());
    }
    println!("Total: {} chars", pages.total_chars());

    Ok(())
}

/// Reads questions from stdin and prints assembled context replies
async fn run_console<S, C>(engine: &GuideEngine<S, C>) -> anyhow::Result<()>
where
    S: lantern::SharedStore,
    C: SnapshotSource,
{
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter a question (empty line to exit):\n").await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() {
            break;
        }

        let reply = engine.context_for(question).await.into_reply_text();
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("Console session ended");
    Ok(())
}
