use std::sync::Arc;

use crate::application::ports::{
    GenerationOptions, LlmClient, LlmClientError, WeatherError, WeatherProvider,
};
use crate::domain::Forecast;

const SUMMARY_MAX_TOKENS: u32 = 5000;

pub struct WeatherService<L: LlmClient + ?Sized> {
    provider: Arc<dyn WeatherProvider>,
    llm_client: Arc<L>,
}

impl<L: LlmClient + ?Sized> WeatherService<L> {
    pub fn new(provider: Arc<dyn WeatherProvider>, llm_client: Arc<L>) -> Self {
        Self {
            provider,
            llm_client,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn forecast(&self, city: &str) -> Result<Forecast, WeatherServiceError> {
        let forecast = self.provider.forecast(city).await?;
        tracing::debug!(entries = forecast.list.len(), "Forecast fetched");
        Ok(forecast)
    }

    /// Markdown bullet list of the forecast grouped by date, written by the model.
    #[tracing::instrument(skip(self))]
    pub async fn summarize(&self, city: &str) -> Result<String, WeatherServiceError> {
        let forecast = self.forecast(city).await?;
        self.summarize_forecast(&forecast).await
    }

    pub async fn summarize_forecast(
        &self,
        forecast: &Forecast,
    ) -> Result<String, WeatherServiceError> {
        let data = serde_json::to_string(forecast)
            .map_err(|e| WeatherServiceError::Serialization(e.to_string()))?;

        let prompt = format!(
            r#"Given a JSON weather forecast with a city block and a list of forecast entries, write a human-readable markdown list.
For each entry show the date and time (dt_txt), the weather condition (main and description), the probability of precipitation (pop as a percentage) and the rain volume over 3 hours when present (rain["3h"]).
Group the entries by date as a bullet list, with each time entry indented under its date.

[JSON DATA]
{}"#,
            data
        );

        let summary = self
            .llm_client
            .complete(&prompt, &GenerationOptions::generation(SUMMARY_MAX_TOKENS))
            .await?;

        Ok(summary.trim().to_string())
    }

    /// Deterministic per-entry summary, no model involved.
    pub async fn report(&self, city: &str) -> Result<Vec<String>, WeatherServiceError> {
        let forecast = self.forecast(city).await?;
        Ok(forecast.report_lines())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherServiceError {
    #[error("weather: {0}")]
    Weather(#[from] WeatherError),
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("serialization: {0}")]
    Serialization(String),
}
