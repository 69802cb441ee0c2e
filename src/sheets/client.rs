use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::{Error, Result, SheetError};
use crate::auth::TokenProvider;
use crate::config::SheetsConfig;

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendBody<'a> {
    values: &'a [Vec<String>],
    major_dimension: &'static str,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: Option<String>,
    status: Option<String>,
}

/// Authenticated access to the values API of one spreadsheet
pub struct SheetsClient {
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    config: SheetsConfig,
}

impl SheetsClient {
    pub fn new(http: reqwest::Client, tokens: Arc<dyn TokenProvider>, config: SheetsConfig) -> Self {
        Self {
            http,
            tokens,
            config,
        }
    }

    /// GET the rows of `range`. A range with no data yields no rows.
    pub async fn fetch_range(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let token = self.tokens.access_token().await?;
        let url = self.values_url(range)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&token.token)
            .send()
            .await
            .map_err(SheetError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(SheetError::from)?;
        debug!(range, status = status.as_u16(), "fetched sheet range");

        if !status.is_success() {
            return Err(self.rejected(status, &body).await);
        }

        let parsed: ValueRange =
            serde_json::from_str(&body).map_err(|e| SheetError::Decode(e.to_string()))?;

        Ok(parsed
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    /// Append `rows` after the last row of `range`, inserting new rows.
    pub async fn append_rows(&self, range: &str, rows: &[Vec<String>]) -> Result<()> {
        let token = self.tokens.access_token().await?;
        let mut url = self.values_url(&format!("{}:append", range))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let body = AppendBody {
            values: rows,
            major_dimension: "ROWS",
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(&token.token)
            .json(&body)
            .send()
            .await
            .map_err(SheetError::from)?;

        let status = response.status();
        debug!(range, rows = rows.len(), status = status.as_u16(), "appended sheet rows");

        if !status.is_success() {
            let body = response.text().await.map_err(SheetError::from)?;
            return Err(self.rejected(status, &body).await);
        }

        Ok(())
    }

    /// A 401 means the bearer token is no longer accepted, so a cached one
    /// must not be handed out again. The call itself is not retried.
    async fn rejected(&self, status: reqwest::StatusCode, body: &str) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
        }
        status_error(status, body).into()
    }

    fn values_url(&self, range: &str) -> Result<Url, SheetError> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| SheetError::InvalidUrl(format!("{}: {}", self.config.api_base, e)))?;

        url.path_segments_mut()
            .map_err(|_| SheetError::InvalidUrl(self.config.api_base.clone()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.config.spreadsheet_id.as_str(), "values", range]);

        Ok(url)
    }
}

/// Formatted values arrive as strings; anything else is rendered as text.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn status_error(status: reqwest::StatusCode, body: &str) -> SheetError {
    let message = serde_json::from_str::<GoogleErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message.or(b.error.status))
        .unwrap_or_else(|| match body.trim() {
            "" => status.canonical_reason().unwrap_or("unknown error").to_string(),
            raw => raw.to_string(),
        });

    SheetError::Status {
        status: status.as_u16(),
        message,
    }
}
