use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

pub const IBM_IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

const API_KEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
const REFRESH_MARGIN_SECS: i64 = 60;
const DEFAULT_LIFETIME_SECS: i64 = 3600;

/// Exchanges an API key for a bearer token and caches it until shortly before expiry.
pub struct IamTokenProvider {
    client: Client,
    token_url: String,
    api_key: String,
    cached: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct IamTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry as a unix timestamp.
    #[serde(default)]
    expiration: Option<i64>,
}

impl IamTokenProvider {
    pub fn new(api_key: impl Into<String>, token_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token_url: token_url.unwrap_or_else(|| IBM_IAM_TOKEN_URL.to_string()),
            api_key: api_key.into(),
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, IamTokenError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > Utc::now() {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);

        Ok(access_token)
    }

    async fn request_token(&self) -> Result<CachedToken, IamTokenError> {
        tracing::debug!(url = %self.token_url, "Requesting IAM access token");

        let response = self
            .client
            .post(&self.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("apikey", self.api_key.as_str()),
                ("grant_type", API_KEY_GRANT_TYPE),
            ])
            .send()
            .await
            .map_err(|e| IamTokenError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IamTokenError::Rejected(format!("HTTP {}: {}", status, body)));
        }

        let token: IamTokenResponse = response
            .json()
            .await
            .map_err(|e| IamTokenError::InvalidResponse(e.to_string()))?;

        let now = Utc::now();
        let expires_at = token
            .expiration
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .or_else(|| token.expires_in.map(|secs| now + Duration::seconds(secs)))
            .unwrap_or_else(|| now + Duration::seconds(DEFAULT_LIFETIME_SECS));

        tracing::info!(expires_at = %expires_at, "IAM access token refreshed");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IamTokenError {
    #[error("token request failed: {0}")]
    RequestFailed(String),
    #[error("token request rejected: {0}")]
    Rejected(String),
    #[error("invalid token response: {0}")]
    InvalidResponse(String),
}
