use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use civicbridge::application::ports::{WeatherError, WeatherProvider};
use civicbridge::infrastructure::weather::OpenWeatherClient;

use crate::support::spawn_server;

fn mock_openweather() -> Router {
    Router::new().route(
        "/data/2.5/forecast",
        get(|Query(query): Query<HashMap<String, String>>| async move {
            if query.get("appid").map(String::as_str) != Some("weather-key") {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "cod": 401, "message": "Invalid API key" })),
                )
                    .into_response();
            }

            match query.get("q").map(String::as_str) {
                Some("Kochi") => Json(json!({
                    "cod": "200",
                    "message": 0,
                    "cnt": 1,
                    "list": [{
                        "dt": 1718456400,
                        "main": { "temp": 301.2 },
                        "weather": [{ "id": 500, "main": "Rain", "description": "light rain" }],
                        "pop": 0.72,
                        "rain": { "3h": 1.25 },
                        "dt_txt": "2024-06-15 15:00:00"
                    }],
                    "city": { "id": 1, "name": "Kochi", "coord": { "lat": 9.9667, "lon": 76.2833 } }
                }))
                .into_response(),
                Some("Nowhere") => Json(json!({ "cod": "200", "city": {} })).into_response(),
                _ => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "cod": "404", "message": "city not found" })),
                )
                    .into_response(),
            }
        }),
    )
}

#[tokio::test]
async fn given_known_city_when_fetching_forecast_then_payload_is_filtered() {
    let (base_url, shutdown) = spawn_server(mock_openweather()).await;
    let client = OpenWeatherClient::new("weather-key", &base_url);

    let forecast = client.forecast("Kochi").await.unwrap();

    assert_eq!(forecast.city.name.as_deref(), Some("Kochi"));
    assert_eq!(forecast.list.len(), 1);
    assert_eq!(forecast.list[0].weather[0].main, "Rain");
    assert_eq!(forecast.list[0].rain_volume_mm(), 1.25);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_unknown_city_when_fetching_forecast_then_upstream_message_is_kept() {
    let (base_url, shutdown) = spawn_server(mock_openweather()).await;
    let client = OpenWeatherClient::new("weather-key", &base_url);

    let result = client.forecast("Atlantis").await;

    assert!(matches!(result, Err(WeatherError::Upstream(ref m)) if m == "city not found"));

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_numeric_error_code_when_fetching_forecast_then_upstream_error() {
    let (base_url, shutdown) = spawn_server(mock_openweather()).await;
    let client = OpenWeatherClient::new("wrong-key", &base_url);

    let result = client.forecast("Kochi").await;

    assert!(matches!(result, Err(WeatherError::Upstream(ref m)) if m == "Invalid API key"));

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_payload_without_list_when_fetching_forecast_then_invalid_response() {
    let (base_url, shutdown) = spawn_server(mock_openweather()).await;
    let client = OpenWeatherClient::new("weather-key", &base_url);

    let result = client.forecast("Nowhere").await;

    assert!(matches!(result, Err(WeatherError::InvalidResponse(_))));

    shutdown.send(()).ok();
}
