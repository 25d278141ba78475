//! webscrap: single-page website metadata scraper

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use webscrap::{
    config::{Config, LogFormat, LogLevel, LoggingConfig},
    http::HttpServer,
    pipeline::ScrapePipeline,
    store::JsonWebsiteStore,
};

#[derive(Parser)]
#[command(name = "webscrap")]
#[command(about = "Fetch web pages and keep one metadata record per host")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "webscrap.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve,

    /// Scrape a single URL and print the stored record
    Scrape {
        /// Page to scrape
        url: String,
    },

    /// Write a default configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn init_logging(logging: &LoggingConfig, verbose: u8) -> Result<()> {
    let level = LogLevel::from_verbosity(verbose)
        .unwrap_or_else(|| logging.level.clone())
        .as_tracing_level();

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    match logging.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)?;
    config.apply_env()?;

    init_logging(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Scrape { url } => scrape_url(config, url).await,
        Commands::Init { path } => init_config(&path),
    }
}

fn build_pipeline(config: &Config) -> Result<Arc<ScrapePipeline>> {
    let store = Arc::new(
        JsonWebsiteStore::open(&config.store.path).with_context(|| {
            format!("Failed to open website store '{}'", config.store.path.display())
        })?,
    );
    let pipeline = ScrapePipeline::from_config(config, store)?;
    Ok(Arc::new(pipeline))
}

async fn serve(config: Config) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let server = HttpServer::new(config.http.clone(), pipeline);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C");
            let _ = shutdown_tx.send(());
        }
    });

    server.run(shutdown_rx).await
}

async fn scrape_url(config: Config, url: String) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let outcome = pipeline.run(Some(&url)).await?;
    println!("{}", serde_json::to_string_pretty(&outcome.record)?);
    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    let config_path = path.join("webscrap.toml");
    if config_path.exists() {
        anyhow::bail!("Config file '{}' already exists", config_path.display());
    }

    let content = format!("# webscrap configuration\n\n{}", Config::default().to_toml()?);
    std::fs::write(&config_path, content)?;
    println!("Wrote {}", config_path.display());
    Ok(())
}
