// src/weather_client.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";
pub const FORECAST_DAYS: usize = 7;
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),

    #[error("URL parsing error")]
    UrlParse(#[from] url::ParseError),

    #[error("Forecast API returned an error: Status={status}, Message='{message}'")]
    ApiError { status: StatusCode, message: String },

    #[error("Forecast response incomplete: {0}")]
    Incomplete(String),

    #[error("Invalid forecast date '{0}'")]
    InvalidDate(String),
}

// --- Open-Meteo Response Structures ---

/// The `daily` block, one array element per forecast day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DailyForecast {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub weathercode: Vec<Option<u16>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResponse {
    pub daily: DailyForecast,
}

/// One forecast day with every value present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayReading {
    pub code: u16,
    pub temp_max: f64,
    pub temp_min: f64,
}

impl DailyForecast {
    /// Values for day `idx`; a missing or null value is an error.
    pub fn day(&self, idx: usize) -> Result<DayReading, WeatherError> {
        let missing = |field: &str| {
            WeatherError::Incomplete(format!("no {} value for day {}", field, idx))
        };
        Ok(DayReading {
            code: self
                .weathercode
                .get(idx)
                .copied()
                .flatten()
                .ok_or_else(|| missing("weathercode"))?,
            temp_max: self
                .temperature_2m_max
                .get(idx)
                .copied()
                .flatten()
                .ok_or_else(|| missing("temperature_2m_max"))?,
            temp_min: self
                .temperature_2m_min
                .get(idx)
                .copied()
                .flatten()
                .ok_or_else(|| missing("temperature_2m_min"))?,
        })
    }

    pub fn date_str(&self, idx: usize) -> Result<&str, WeatherError> {
        self.time
            .get(idx)
            .map(String::as_str)
            .ok_or_else(|| WeatherError::Incomplete(format!("no date for day {}", idx)))
    }
}

/// Anything that can produce a daily forecast for a coordinate.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn daily_forecast(&self, latitude: f64, longitude: f64)
        -> Result<DailyForecast, WeatherError>;
}

// --- Open-Meteo Client ---

#[derive(Clone, Debug)]
pub struct OpenMeteoConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: OPEN_METEO_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct OpenMeteoClient {
    config: OpenMeteoConfig,
    http_client: Client,
}

impl OpenMeteoClient {
    pub fn new(config: OpenMeteoConfig) -> Result<Self, WeatherError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> Result<Url, WeatherError> {
        let base = format!("{}/v1/forecast", self.config.base_url.trim_end_matches('/'));
        Ok(Url::parse_with_params(
            &base,
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
            ],
        )?)
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<DailyForecast, WeatherError> {
        let url = self.forecast_url(latitude, longitude)?;
        debug!("Requesting forecast: {}", url);

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error body: {}", e));
            return Err(WeatherError::ApiError { status, message });
        }

        let body = response.json::<ForecastResponse>().await?;
        Ok(body.daily)
    }
}
