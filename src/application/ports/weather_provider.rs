use async_trait::async_trait;

use crate::domain::Forecast;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Upcoming multi-day forecast for `city`, already filtered.
    async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("Weather API error: {0}")]
    Upstream(String),
    #[error("Failed to parse weather data: {0}")]
    InvalidResponse(String),
}
