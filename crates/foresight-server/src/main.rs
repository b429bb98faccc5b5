use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foresight_core::config::StorageBackend;
use foresight_server::app::{AppState, build_service, load_settings, render_settings};
use foresight_server::router;
use std::path::PathBuf;

const DEFAULT_LOG_FILTER: &str = "info,foresight=debug";

#[derive(Parser)]
#[command(name = "foresight")]
#[command(about = "Foresight - AI startup, design and persona proxy", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Socket address to bind, overriding config and environment
        #[arg(long)]
        bind: Option<String>,

        /// Record store backend (memory | json_dir)
        #[arg(long)]
        storage: Option<StorageBackend>,
    },
    /// Print the effective configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let mut settings = load_settings(cli.config.as_deref())
        .await
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Serve { bind, storage } => {
            if let Some(bind) = bind {
                settings.config.server.bind = bind;
            }
            if let Some(storage) = storage {
                settings.config.storage.backend = storage;
            }
            serve(settings).await
        }
        Commands::Config => {
            print!("{}", render_settings(&settings)?);
            Ok(())
        }
    }
}

async fn serve(settings: foresight_server::app::Settings) -> Result<()> {
    let service = build_service(&settings.config, &settings.secrets)
        .await
        .context("failed to build analysis service")?;
    let app = router(AppState::new(service));

    let bind = &settings.config.server.bind;
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!("[Server] Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("[Server] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[Server] Failed to listen for shutdown signal: {e}");
    }
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
