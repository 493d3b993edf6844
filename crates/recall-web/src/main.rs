//! recall server binary.
//!
//! Reads `recall.toml` (or the path given with `--config`) layered with
//! `RECALL_*` environment variables, opens the configured store, and serves
//! the dashboard and JSON API over HTTP until interrupted.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use recall_core::store::ConceptStore;
use recall_store_json::JsonStore;
use recall_store_sqlite::SqliteStore;
use recall_web::{AppState, Backend, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Spaced-repetition revision tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "recall.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("RECALL"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let data_path = expand_tilde(&server_cfg.data_path);

  match server_cfg.backend {
    Backend::Json => {
      let store = JsonStore::open(&data_path)
        .await
        .with_context(|| format!("failed to open json store at {data_path:?}"))?;
      tracing::info!(path = %data_path.display(), "using json store");
      serve(store, &server_cfg).await?;
    }
    Backend::Sqlite => {
      let store = SqliteStore::open(&data_path)
        .await
        .with_context(|| format!("failed to open sqlite store at {data_path:?}"))?;
      tracing::info!(path = %data_path.display(), "using sqlite store");
      serve(store.clone(), &server_cfg).await?;
      store.close().await.context("failed to close sqlite store")?;
    }
  }

  Ok(())
}

async fn serve<S>(store: S, cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: ConceptStore + Clone + 'static,
  S::Error: Into<recall_core::Error>,
{
  let app = recall_web::router(AppState { store: Arc::new(store) });
  let address = format!("{}:{}", cfg.host, cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    // Without a signal handler, run until killed.
    tracing::error!("failed to listen for shutdown signal: {e}");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
