use async_trait::async_trait;
use reqwest::{Client, StatusCode, redirect};

use crate::application::ports::{FetchedMedia, MediaFetchError, MediaFetcher};

const MAX_REDIRECTS: usize = 10;

/// Downloads message media with the account's basic credentials. Twilio
/// answers media URLs with a redirect to a signed CDN location.
pub struct TwilioMediaFetcher {
    client: Client,
    account_sid: String,
    auth_token: String,
}

impl TwilioMediaFetcher {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, MediaFetchError> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| MediaFetchError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
        })
    }
}

#[async_trait]
impl MediaFetcher for TwilioMediaFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchedMedia, MediaFetchError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
            .map_err(|e| MediaFetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MediaFetchError::UnexpectedStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response
            .bytes()
            .await
            .map_err(|e| MediaFetchError::RequestFailed(e.to_string()))?;

        tracing::debug!(bytes = data.len(), content_type = ?content_type, "Media downloaded");

        Ok(FetchedMedia { data, content_type })
    }
}
