use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;

use crate::llm::LanguageModel;
use crate::sheet::SheetSource;

pub type DbPool = SqlitePool;

/// Application state shared by every request handler
pub struct AppState {
  pub db: DbPool,
  pub sheets: Arc<dyn SheetSource>,
  pub llm: Arc<dyn LanguageModel>,
}

impl AppState {
  pub fn new(db: DbPool, sheets: Arc<dyn SheetSource>, llm: Arc<dyn LanguageModel>) -> Self {
    Self { db, sheets, llm }
  }
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(database_url: &str) -> Result<DbPool, Box<dyn std::error::Error>> {
  tracing::info!(database_url, "initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("database initialized successfully");

  Ok(pool)
}
