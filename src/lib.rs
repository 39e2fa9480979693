pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod history;
pub mod llm;
pub mod logbook;
pub mod logging;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod sheet;
pub mod store;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use config::AppConfig;
use db::AppState;
use llm::ClaudeClient;
use sheet::GoogleSheetSource;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  logging::init();

  let config = AppConfig::from_env()?;
  let pool = db::initialize_db(&config.database_url).await?;

  let sheets = Arc::new(GoogleSheetSource::new(&config.sheet_id, &config.sheet_gid)?);
  let llm = Arc::new(ClaudeClient::new(config.anthropic_api_key.clone()));
  let state = Arc::new(AppState::new(pool, sheets, llm));

  let app = routes::router(state).layer(TraceLayer::new_for_http());

  let listener = TcpListener::bind(config.bind_addr).await?;
  tracing::info!(addr = %config.bind_addr, sheet_id = %config.sheet_id, "listening");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  tracing::info!("server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for shutdown signal");
  }
}
