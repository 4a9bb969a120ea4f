use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::application::ports::{WeatherError, WeatherProvider};
use crate::domain::Forecast;

/// OpenWeatherMap 5 day / 3 hour forecast.
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[tracing::instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let response = self
            .client
            .get(format!("{}/data/2.5/forecast", self.base_url))
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::ApiRequestFailed(e.to_string()))?;

        // Failures come back as a JSON body with a non-"200" `cod`, whatever the status.
        let raw: Value = response
            .json()
            .await
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

        if let Some(message) = Forecast::upstream_error(&raw) {
            tracing::warn!(message = %message, "Weather API rejected the request");
            return Err(WeatherError::Upstream(message));
        }

        if !raw.get("list").is_some_and(Value::is_array) {
            return Err(WeatherError::InvalidResponse(
                "missing forecast list".to_string(),
            ));
        }

        Ok(Forecast::filter(&raw))
    }
}
