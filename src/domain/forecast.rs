use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const FORECAST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Multi-day forecast reduced to what matters for scheduling outdoor work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: ForecastCity,
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    pub name: Option<String>,
    pub coord: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: Option<i64>,
    pub dt_txt: Option<String>,
    /// Probability of precipitation, 0..=1.
    pub pop: f64,
    pub weather: Vec<WeatherCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Rainfall>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rainfall {
    /// Rain volume in mm over the last three hours.
    #[serde(rename = "3h", default, skip_serializing_if = "Option::is_none")]
    pub three_hours: Option<f64>,
}

impl Forecast {
    /// Reduces a raw forecast payload to precipitation-relevant fields.
    ///
    /// Missing fields are tolerated and defaulted, so filtering an already
    /// filtered forecast yields the same forecast.
    pub fn filter(raw: &Value) -> Self {
        let city = raw.get("city");

        let name = city
            .and_then(|c| c.get("name"))
            .and_then(Value::as_str)
            .map(String::from);
        let coord = city
            .and_then(|c| c.get("coord"))
            .and_then(|c| serde_json::from_value(c.clone()).ok());

        let list = raw
            .get("list")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(ForecastEntry::filter).collect())
            .unwrap_or_default();

        Self {
            city: ForecastCity { name, coord },
            list,
        }
    }

    /// Returns the upstream error message when the payload's `cod` is not 200.
    pub fn upstream_error(raw: &Value) -> Option<String> {
        let code = match raw.get("cod")? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        if code == "200" {
            return None;
        }

        Some(
            raw.get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string(),
        )
    }

    pub fn report_lines(&self) -> Vec<String> {
        self.list
            .iter()
            .filter_map(ForecastEntry::report_line)
            .collect()
    }
}

impl ForecastEntry {
    fn filter(entry: &Value) -> Self {
        let weather = entry
            .get("weather")
            .and_then(Value::as_array)
            .and_then(|conditions| conditions.first());

        let main = weather
            .and_then(|w| w.get("main"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown");
        let description = weather
            .and_then(|w| w.get("description"))
            .and_then(Value::as_str)
            .unwrap_or("No description");

        Self {
            dt: entry.get("dt").and_then(Value::as_i64),
            dt_txt: entry
                .get("dt_txt")
                .and_then(Value::as_str)
                .map(String::from),
            pop: entry.get("pop").and_then(Value::as_f64).unwrap_or(0.0),
            weather: vec![WeatherCondition {
                main: main.to_string(),
                description: description.to_string(),
            }],
            rain: entry.get("rain").map(|rain| Rainfall {
                three_hours: rain.get("3h").and_then(Value::as_f64),
            }),
        }
    }

    pub fn rain_chance(&self) -> RainChance {
        RainChance::from_probability(self.pop)
    }

    pub fn rain_volume_mm(&self) -> f64 {
        self.rain.and_then(|r| r.three_hours).unwrap_or(0.0)
    }

    /// One human-readable line, or `None` when the timestamp is missing or malformed.
    pub fn report_line(&self) -> Option<String> {
        let timestamp =
            NaiveDateTime::parse_from_str(self.dt_txt.as_deref()?, FORECAST_TIMESTAMP_FORMAT)
                .ok()?;

        let description = self
            .weather
            .first()
            .map(|w| capitalize(&w.description))
            .unwrap_or_else(|| "No data".to_string());

        Some(format!(
            "{}, {} at {}: {}. Rain chance: {}. Rain volume: {} mm.",
            timestamp.format("%A"),
            timestamp.date(),
            timestamp.format("%-I:%M %p"),
            description,
            self.rain_chance().describe(self.pop),
            format_volume(self.rain.and_then(|r| r.three_hours)),
        ))
    }
}

/// A missing reading prints as `0`; measured volumes always keep a decimal.
fn format_volume(volume: Option<f64>) -> String {
    match volume {
        None => "0".to_string(),
        Some(mm) if mm.fract() == 0.0 => format!("{:.1}", mm),
        Some(mm) => mm.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainChance {
    Low,
    Moderate,
    High,
}

impl RainChance {
    pub fn from_probability(pop: f64) -> Self {
        if pop < 0.3 {
            RainChance::Low
        } else if pop < 0.6 {
            RainChance::Moderate
        } else {
            RainChance::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RainChance::Low => "Low",
            RainChance::Moderate => "Moderate",
            RainChance::High => "High",
        }
    }

    pub fn describe(&self, pop: f64) -> String {
        format!("{} ({}%)", self.as_str(), (pop * 100.0) as i64)
    }
}

impl fmt::Display for RainChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
