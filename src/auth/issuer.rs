use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use super::{sign_assertion, AccessToken, AuthError, Claims, TokenProvider, JWT_BEARER_GRANT};
use crate::config::GoogleConfig;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Signs a fresh assertion and exchanges it on every call. Wrap in
/// [`super::CachingTokenProvider`] to reuse tokens until they expire.
pub struct TokenIssuer {
    http: reqwest::Client,
    google: GoogleConfig,
}

impl TokenIssuer {
    pub fn new(http: reqwest::Client, google: GoogleConfig) -> Self {
        Self { http, google }
    }

    pub async fn get_access_token(&self) -> Result<AccessToken, AuthError> {
        let claims = Claims::new(&self.google, Utc::now());
        let assertion = sign_assertion(&claims, &self.google.private_key)?;

        debug!(token_uri = %self.google.token_uri, "exchanging service account assertion");

        let response = self
            .http
            .post(&self.google.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                description: describe_rejection(&body),
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        match parsed.access_token {
            Some(token) if !token.is_empty() => Ok(AccessToken::from_claims(token, &claims)),
            _ => Err(AuthError::MissingAccessToken),
        }
    }
}

#[async_trait]
impl TokenProvider for TokenIssuer {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        self.get_access_token().await
    }
}

/// Prefer the provider's `error_description`, then its `error` code, then the raw body.
fn describe_rejection(body: &str) -> String {
    let parsed = serde_json::from_str::<TokenErrorResponse>(body).ok();

    parsed
        .and_then(|e| e.error_description.or(e.error))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| match body.trim() {
            "" => "no error description".to_string(),
            raw => raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_error_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#;
        assert_eq!(describe_rejection(body), "Invalid JWT Signature.");
    }

    #[test]
    fn rejection_falls_back_to_error_code_then_body() {
        assert_eq!(describe_rejection(r#"{"error":"invalid_client"}"#), "invalid_client");
        assert_eq!(describe_rejection("Bad Gateway"), "Bad Gateway");
        assert_eq!(describe_rejection(""), "no error description");
    }
}
