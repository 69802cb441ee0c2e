pub mod client;
pub mod error;
pub mod repository;
pub mod rows;

pub use client::SheetsClient;
pub use error::{Error, ErrorKind, Result, SheetError};
pub use repository::SheetsRepository;

use std::time::Duration;

pub const CAMPAIGNS_RANGE: &str = "Campaigns!A2:C";
pub const SOURCE_TYPES_RANGE: &str = "SourceTypes!A2:D";
pub const UTM_RECORDS_RANGE: &str = "UTMRecords!A2:I";

/// Shared HTTP client; the timeout bounds every token exchange and values call.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
