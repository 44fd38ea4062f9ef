//! wbo7 server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store and the winner log, and serves the site over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wbo7_core::draw::RandomNumbers;
use wbo7_store_sqlite::SqliteStore;
use wbo7_web::{
  AppState, ServerConfig, browser,
  settings::expand_tilde,
};
use wbo7_winner_log::CsvWinnerLog;

#[derive(Parser)]
#[command(author, version, about = "WBO7 bet registry and draw server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Do not open the home page in a browser after startup.
  #[arg(long)]
  no_browser: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if cli.no_browser {
    server_cfg.open_browser = false;
  }

  let store_path = expand_tilde(&server_cfg.store_path);
  let log_path = expand_tilde(&server_cfg.winner_log_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = %store_path.display(), "bet store ready");

  let state = AppState {
    store:   Arc::new(store),
    winners: Arc::new(CsvWinnerLog::new(&log_path)),
    numbers: Arc::new(RandomNumbers),
  };
  tracing::info!(path = %log_path.display(), "winner log configured");

  let app = wbo7_web::router(state).layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  if server_cfg.open_browser {
    browser::open_after(server_cfg.url(), browser::LAUNCH_DELAY);
  }

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
