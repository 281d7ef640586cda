use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use datalens_lib::config::ServerConfig;
use datalens_lib::{AppState, build_router};
use datalens_storage::LibraryStore;

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  info!("starting datalens v{}", env!("CARGO_PKG_VERSION"));

  let paths = datalens_config::paths().context("resolving data directories")?;
  info!(config = %paths.config_file().display(), "configuration");

  let server = ServerConfig::load().context("loading [server] config")?;
  let store = Arc::new(LibraryStore::from_config(paths).context("opening storage")?);

  let state = AppState::new(store.clone(), store);
  let app = build_router(state);

  let listener = tokio::net::TcpListener::bind(&server.bind_addr)
    .await
    .with_context(|| format!("binding {}", server.bind_addr))?;
  info!(addr = %server.bind_addr, "listening");

  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

  info!("shut down");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "could not install ctrl-c handler");
    std::future::pending::<()>().await;
  }
}
