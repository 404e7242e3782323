use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::SourceError;

/// Refresh once the cached token is within this window of its expiry.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// Applied when the token endpoint omits expires_in.
const DEFAULT_TTL_SECONDS: i64 = 86_400;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Client-credentials token source for the Hostaway API.
///
/// The cached pair lives behind a mutex that is held across the exchange
/// call, so concurrent requests share one refresh instead of racing.
pub struct AccessTokenProvider {
    base_url: String,
    account_id: String,
    api_key: String,
    cached: Mutex<Option<CachedToken>>,
}

impl AccessTokenProvider {
    pub fn new(base_url: String, account_id: String, api_key: String) -> Self {
        Self {
            base_url,
            account_id,
            api_key,
            cached: Mutex::new(None),
        }
    }

    /// Return a token valid for at least the refresh margin, exchanging
    /// credentials only when the cache cannot serve one.
    pub async fn access_token(&self, client: &Client) -> Result<String, SourceError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECONDS) {
                return Ok(token.access_token.clone());
            }
            debug!(
                "Hostaway access token expired or expiring soon (expires at {}), refreshing",
                token.expires_at
            );
        }

        let fresh = self.exchange_credentials(client).await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    async fn exchange_credentials(&self, client: &Client) -> Result<CachedToken, SourceError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.account_id.as_str()),
            ("client_secret", self.api_key.as_str()),
            ("scope", "general"),
        ];

        let response = client
            .post(format!("{}/accessTokens", self.base_url))
            .form(&params)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SourceError::Fetch(format!(
                "Hostaway token exchange returned {}: {}",
                status, error_text
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        let token: TokenResponse = serde_json::from_value(payload)
            .map_err(|err| SourceError::Schema(format!("Hostaway token payload: {}", err)))?;

        let ttl = token.expires_in.unwrap_or(DEFAULT_TTL_SECONDS);
        let expires_at = Utc::now() + Duration::seconds(ttl);
        info!("Obtained Hostaway access token (expires at {})", expires_at);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}
