//! Spreadsheet export fetching.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const GOOGLE_SHEETS_BASE: &str = "https://docs.google.com";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
  #[error("Invalid sheet URL: {0}")]
  InvalidUrl(String),

  #[error("Failed to fetch sheet: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Failed to fetch sheet: HTTP {status} {reason}")]
  Status { status: u16, reason: String },
}

impl Serialize for SheetError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Sheet Source
/// ---------------------------------------------------------------------------

/// Anything that can hand back the planning sheet as CSV text.
#[async_trait]
pub trait SheetSource: Send + Sync {
  /// Identifier of the published sheet, for diagnostics.
  fn sheet_id(&self) -> &str;

  /// Fetch the full export. Called once per request; nothing is cached.
  async fn fetch_csv(&self) -> Result<String, SheetError>;
}

/// Publicly shared Google Sheet, read through its CSV export endpoint.
pub struct GoogleSheetSource {
  client: Client,
  sheet_id: String,
  export_url: Url,
}

impl GoogleSheetSource {
  pub fn new(sheet_id: &str, gid: &str) -> Result<Self, SheetError> {
    Self::with_base_url(GOOGLE_SHEETS_BASE, sheet_id, gid)
  }

  /// Point at a different host (used by tests against a mock server).
  pub fn with_base_url(base_url: &str, sheet_id: &str, gid: &str) -> Result<Self, SheetError> {
    let export_url = build_export_url(base_url, sheet_id, gid)?;
    Ok(Self {
      client: Client::new(),
      sheet_id: sheet_id.to_string(),
      export_url,
    })
  }
}

pub fn build_export_url(base_url: &str, sheet_id: &str, gid: &str) -> Result<Url, SheetError> {
  let mut url = Url::parse(base_url).map_err(|e| SheetError::InvalidUrl(e.to_string()))?;

  url
    .path_segments_mut()
    .map_err(|_| SheetError::InvalidUrl(format!("{} cannot be a base", base_url)))?
    .pop_if_empty()
    .extend(["spreadsheets", "d", sheet_id, "export"]);

  url
    .query_pairs_mut()
    .append_pair("format", "csv")
    .append_pair("gid", gid);

  Ok(url)
}

#[async_trait]
impl SheetSource for GoogleSheetSource {
  fn sheet_id(&self) -> &str {
    &self.sheet_id
  }

  async fn fetch_csv(&self) -> Result<String, SheetError> {
    tracing::debug!(url = %self.export_url, "fetching sheet export");

    let response = self
      .client
      .get(self.export_url.clone())
      .header("Cache-Control", "no-cache")
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(SheetError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
      });
    }

    Ok(response.text().await?)
  }
}
