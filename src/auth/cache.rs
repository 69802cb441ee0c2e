use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use super::{AccessToken, AuthError, TokenProvider};

/// Single-slot token cache keyed by expiry.
///
/// The slot lock is held across the refresh so concurrent callers wait for one
/// exchange instead of racing their own.
pub struct CachingTokenProvider<P> {
    inner: P,
    slot: Mutex<Option<AccessToken>>,
    refresh_margin: Duration,
}

impl<P: TokenProvider> CachingTokenProvider<P> {
    pub fn new(inner: P) -> Self {
        Self::with_refresh_margin(inner, Duration::seconds(60))
    }

    pub fn with_refresh_margin(inner: P, refresh_margin: Duration) -> Self {
        Self {
            inner,
            slot: Mutex::new(None),
            refresh_margin,
        }
    }
}

#[async_trait]
impl<P: TokenProvider> TokenProvider for CachingTokenProvider<P> {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_valid_for(Utc::now(), self.refresh_margin) {
                return Ok(token.clone());
            }
            debug!(expires_at = %token.expires_at, "cached access token is about to expire");
        }

        let fresh = self.inner.access_token().await?;
        *slot = Some(fresh.clone());
        Ok(fresh)
    }

    async fn invalidate(&self) {
        if self.slot.lock().await.take().is_some() {
            debug!("dropped cached access token");
        }
    }
}
