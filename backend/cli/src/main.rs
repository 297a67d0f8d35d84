mod api;
mod config;
mod controller;
mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use coinlens_core::{detect_image_mime, ImageAnalyzer, ImagePayload, COIN_PROMPT};
use coinlens_format::format_blocks;

use api::AppState;
use config::Config;
use controller::Controller;

#[derive(Parser)]
#[command(name = "coinlens")]
#[command(about = "CoinLens — AI-assisted coin identification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the CoinLens HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze a local coin photo and print the result
    Analyze {
        /// Path to the image file (JPEG/PNG)
        image: PathBuf,
        /// Override the built-in coin prompt
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Show current server status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Analyze { image, prompt } => {
            run_analyze(&config, &image, prompt.as_deref()).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("CoinLens is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        asset = %config.asset_path,
        "Starting CoinLens server"
    );

    let provider = Arc::new(config.provider()?);
    let controller = Controller::new(provider, &config.asset_path);

    // A missing bundled asset is reported in the session, not fatal:
    // the user can still upload their own photo.
    if let Err(e) = controller.load_default().await {
        warn!(error = %e, "Continuing without the bundled default image");
    }

    let app_state = Arc::new(AppState { controller });
    let app = api::build_router(app_state).layer(CorsLayer::permissive());
    let addr = format!("{}:{}", config.bind_address, config.port);

    info!(addr = %addr, "HTTP API listening");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_analyze(config: &Config, path: &PathBuf, prompt: Option<&str>) -> Result<()> {
    let Some(mime) = detect_image_mime(path) else {
        bail!("{} is not a recognized image file", path.display());
    };
    let bytes = tokio::fs::read(path).await?;
    let payload = match ImagePayload::from_bytes(mime, &bytes) {
        Ok(p) => p,
        Err(e) => {
            terminal::note_error(&e.user_message());
            bail!("{e}");
        }
    };

    let provider = config.provider()?;
    info!(
        provider = provider.name(),
        bytes = payload.byte_len,
        "Analyzing {}",
        path.display()
    );

    match provider.analyze(&payload, prompt.unwrap_or(COIN_PROMPT)).await {
        Ok(text) => {
            let blocks = format_blocks(&text);
            print!("{}", terminal::render_blocks(&blocks, terminal::supports_color()));
            Ok(())
        }
        Err(e) => {
            terminal::note_error(&e.user_message());
            bail!("{e}");
        }
    }
}
