use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UtmUrlError {
    #[error("Invalid destination URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Destination URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),
}

/// Tracking parameters appended to a destination URL. Empty values are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    pub source: String,
    pub medium: String,
    pub campaign: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub term: Option<String>,
}

impl UtmParams {
    fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("utm_source", self.source.trim()),
            ("utm_medium", self.medium.trim()),
            ("utm_campaign", self.campaign.trim()),
            ("utm_term", self.term.as_deref().unwrap_or("").trim()),
            ("utm_content", self.content.trim()),
        ]
    }
}

/// Tag `base` with `params`. Existing query parameters are kept, except
/// previous `utm_*` values, which are replaced.
pub fn build_utm_url(base: &str, params: &UtmParams) -> Result<String, UtmUrlError> {
    let mut url = Url::parse(base.trim()).map_err(|e| UtmUrlError::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UtmUrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !k.starts_with("utm_"))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        for (k, v) in &kept {
            query.append_pair(k, v);
        }
        for (k, v) in params.pairs() {
            if !v.is_empty() {
                query.append_pair(k, v);
            }
        }
    }

    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url.into())
}
