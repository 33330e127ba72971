//! talent-pool server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite record store, starts the in-process event bus, and serves the
//! talent routes over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use talent_pool_api::{BroadcastPublisher, TalentRouter};
use talent_pool_server::{ServerConfig, app, expand_tilde, spawn_notification_log};
use talent_pool_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Talent pool server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
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

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let publisher = BroadcastPublisher::new(&server_cfg.event_bus, server_cfg.bus_capacity);
  spawn_notification_log(publisher.subscribe());

  let router = TalentRouter::new(Arc::new(store), Arc::new(publisher), server_cfg.notify());

  let address = server_cfg.address();
  tracing::info!(bus = %server_cfg.event_bus, store = ?store_path, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(Arc::new(router)))
    .await
    .context("server error")?;

  Ok(())
}
