use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::rows::{decode_rows, SheetRow};
use super::{build_http_client, Error, Result, SheetsClient};
use crate::auth::{CachingTokenProvider, TokenIssuer, TokenProvider};
use crate::config::AppConfig;
use crate::models::utm_record::positional_utm_id;
use crate::models::{
    Campaign, NewCampaign, NewSourceType, NewUtmRecord, SourceType, UtmRecord, CAMPAIGN_ID_PREFIX,
    SOURCE_TYPE_ID_PREFIX,
};

/// Typed reads and appends over the desk's three ranges.
///
/// Nothing is cached: every call goes back to the spreadsheet.
///
/// Known limitations of using a spreadsheet as the store:
/// - `add_utm_record` checks for an existing `utm_url` and then appends as two
///   separate calls, so two writers racing on the same URL can both succeed.
/// - Ids are `<prefix><epoch millis>`; two creations in the same millisecond
///   get the same id.
pub struct SheetsRepository {
    client: SheetsClient,
}

impl SheetsRepository {
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &AppConfig) -> reqwest::Result<Self> {
        let http = build_http_client(config.sheets.request_timeout_secs)?;
        let issuer = TokenIssuer::new(http.clone(), config.google.clone());

        let tokens: Arc<dyn TokenProvider> = if config.sheets.cache_tokens {
            Arc::new(CachingTokenProvider::new(issuer))
        } else {
            Arc::new(issuer)
        };

        Ok(Self::new(SheetsClient::new(http, tokens, config.sheets.clone())))
    }

    pub fn client(&self) -> &SheetsClient {
        &self.client
    }

    pub async fn get_campaigns(&self) -> Result<Vec<Campaign>> {
        self.fetch_all().await
    }

    pub async fn get_source_types(&self) -> Result<Vec<SourceType>> {
        self.fetch_all().await
    }

    pub async fn get_utm_records(&self) -> Result<Vec<UtmRecord>> {
        self.fetch_all().await
    }

    pub async fn check_utm_url_exists(&self, utm_url: &str) -> Result<bool> {
        let (_, records) = self.load_utm_records().await?;
        Ok(records.iter().any(|r| r.utm_url == utm_url))
    }

    /// Append a new link unless its `utm_url` is already stored.
    pub async fn add_utm_record(&self, record: NewUtmRecord) -> Result<UtmRecord> {
        let (row_count, records) = self.load_utm_records().await?;

        if records.iter().any(|r| r.utm_url == record.utm_url) {
            warn!(utm_url = %record.utm_url, "rejected duplicate UTM URL");
            return Err(Error::Duplicate {
                utm_url: record.utm_url,
            });
        }

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.client
            .append_rows(UtmRecord::RANGE, &[record.to_cells(&created_at)])
            .await?;

        info!(utm_url = %record.utm_url, department = %record.department, "stored UTM record");

        Ok(UtmRecord {
            utm_id: positional_utm_id(row_count),
            url: record.url,
            client: record.client,
            campaign: record.campaign,
            source: record.source,
            source_type: record.source_type,
            identifier: record.identifier,
            utm_url: record.utm_url,
            created_at,
            department: record.department,
        })
    }

    pub async fn add_campaign(&self, campaign: NewCampaign) -> Result<Campaign> {
        let campaign = Campaign::from_new(timestamp_id(CAMPAIGN_ID_PREFIX), campaign);

        self.client
            .append_rows(Campaign::RANGE, &[campaign.to_cells()])
            .await?;

        info!(campaign_id = %campaign.campaign_id, name = %campaign.name, "created campaign");
        Ok(campaign)
    }

    pub async fn add_source_type(&self, source_type: NewSourceType) -> Result<SourceType> {
        let source_type = SourceType::from_new(timestamp_id(SOURCE_TYPE_ID_PREFIX), source_type);

        self.client
            .append_rows(SourceType::RANGE, &[source_type.to_cells()])
            .await?;

        info!(
            source_type_id = %source_type.source_type_id,
            name = %source_type.name,
            source = %source_type.source,
            "created source type"
        );
        Ok(source_type)
    }

    async fn fetch_all<T: SheetRow>(&self) -> Result<Vec<T>> {
        let rows = self.client.fetch_range(T::RANGE).await?;
        Ok(decode_rows(&rows)?)
    }

    /// Raw row count (blank rows included) alongside the decoded records.
    async fn load_utm_records(&self) -> Result<(usize, Vec<UtmRecord>)> {
        let rows = self.client.fetch_range(UtmRecord::RANGE).await?;
        let records = decode_rows(&rows)?;
        Ok((rows.len(), records))
    }
}

fn timestamp_id(prefix: &str) -> String {
    format!("{}{}", prefix, Utc::now().timestamp_millis())
}
