use anyhow::Result;
use clap::{Parser, Subcommand};
use dealbreaker_application::AnalysisUseCase;
use dealbreaker_infrastructure::{ClientConfig, HttpContractBackend, JsonHistoryRepository};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dealbreaker")]
#[command(about = "Deal Breaker - AI contract analyst client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a PDF contract, then inspect it interactively
    Analyze {
        /// Path to the PDF file
        path: PathBuf,
    },
    /// Analyze a contract published at a URL
    Scan {
        /// URL of the page to scan
        url: String,
    },
    /// List past scans (most recent first)
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::load()?;
    let backend = Arc::new(HttpContractBackend::from_config(&config)?);
    let history = Arc::new(JsonHistoryRepository::default_location().await?);
    let usecase = AnalysisUseCase::new(backend, history);

    match cli.command {
        Commands::Analyze { path } => commands::analyze::run_file(&usecase, &path).await,
        Commands::Scan { url } => commands::analyze::run_url(&usecase, &url).await,
        Commands::History => commands::history::run(&usecase).await,
    }
}
