// src/weather.rs
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::weather_client::{DailyForecast, ForecastSource, WeatherError, FORECAST_DAYS};

// --- Locations ---

/// Marker position on the monitor map, in percent of the map box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPosition {
    pub top: u32,
    pub left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub map: Option<MapPosition>,
}

const fn city(name: &'static str, latitude: f64, longitude: f64) -> Location {
    Location {
        name,
        latitude,
        longitude,
        map: None,
    }
}

const fn mapped(name: &'static str, latitude: f64, longitude: f64, top: u32, left: u32) -> Location {
    Location {
        name,
        latitude,
        longitude,
        map: Some(MapPosition { top, left }),
    }
}

pub const NATIONAL: [Location; 10] = [
    city("서울", 37.5665, 126.9780),
    city("부산", 35.1796, 129.0756),
    city("인천", 37.4563, 126.7052),
    city("대구", 35.8714, 128.6014),
    city("대전", 36.3504, 127.3845),
    city("광주", 35.1595, 126.8526),
    city("울산", 35.5384, 129.3114),
    city("세종", 36.4800, 127.2890),
    city("강릉", 37.7519, 128.8760),
    city("제주", 33.4996, 126.5312),
];

pub const CENTRAL: [Location; 5] = [
    mapped("서울", 37.5665, 126.9780, 27, 16),
    mapped("춘천", 37.8813, 127.7298, 18, 45),
    mapped("강릉", 37.7519, 128.8760, 27, 72),
    mapped("대전", 36.3504, 127.3845, 72, 38),
    mapped("전주", 35.8242, 127.1480, 105, 28),
];

pub const SOUTHERN: [Location; 5] = [
    mapped("대구", 35.8714, 128.6014, 42, 62),
    mapped("광주", 35.1595, 126.8526, 58, 22),
    mapped("부산", 35.1796, 129.0756, 72, 78),
    mapped("제주", 33.4996, 126.5312, 115, 72),
    mapped("여수", 34.7604, 127.6622, 92, 28),
];

/// The published weather pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Region {
    /// Ten-city card grid
    National,
    /// Central monitor with map
    Central,
    /// Southern monitor with map
    Southern,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::National, Region::Central, Region::Southern];

    pub fn locations(self) -> &'static [Location] {
        match self {
            Region::National => &NATIONAL,
            Region::Central => &CENTRAL,
            Region::Southern => &SOUTHERN,
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            Region::National => "daily_weather.html",
            Region::Central => "w1.html",
            Region::Southern => "w2.html",
        }
    }

    pub fn is_monitor(self) -> bool {
        !matches!(self, Region::National)
    }
}

// --- Code Mappings ---

/// Icon family drawn by the monitor script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl WeatherKind {
    /// WMO weather code to icon family. Anything unlisted draws as rain.
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => WeatherKind::Sunny,
            1..=3 => WeatherKind::Cloudy,
            71..=77 => WeatherKind::Snowy,
            _ => WeatherKind::Rainy,
        }
    }
}

/// WMO weather code to the emoji shown on a card.
pub fn card_icon(code: u16) -> &'static str {
    match code {
        0 => "☀️",
        1..=3 => "⛅",
        4..=48 => "🌫️",
        49..=67 => "🌧️",
        68..=77 => "☃️",
        _ => "☔",
    }
}

/// Whole degrees, ties to even.
pub fn round_temp(value: f64) -> i64 {
    value.round_ties_even() as i64
}

// --- Aggregated Records ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayForecast {
    /// "MM.DD"
    pub date: String,
    #[serde(rename = "type")]
    pub kind: WeatherKind,
    pub temp_max: i64,
    pub temp_min: i64,
}

/// One monitor city, serialized as-is into the page script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityWeather {
    pub name: String,
    pub top: u32,
    pub left: u32,
    pub today_max: i64,
    pub today_min: i64,
    pub current_type: WeatherKind,
    pub weekly: Vec<DayForecast>,
}

fn map_position(location: &Location) -> MapPosition {
    location.map.unwrap_or(MapPosition { top: 0, left: 0 })
}

fn short_date(raw: &str) -> Result<String, WeatherError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| WeatherError::InvalidDate(raw.to_string()))?;
    Ok(date.format("%m.%d").to_string())
}

impl CityWeather {
    /// Stand-in record for a city whose forecast could not be used.
    pub fn placeholder(location: &Location) -> Self {
        let pos = map_position(location);
        Self {
            name: location.name.to_string(),
            top: pos.top,
            left: pos.left,
            today_max: 0,
            today_min: 0,
            current_type: WeatherKind::Cloudy,
            weekly: Vec::new(),
        }
    }

    /// Builds the record from a forecast covering at least seven days.
    pub fn from_forecast(location: &Location, daily: &DailyForecast) -> Result<Self, WeatherError> {
        let today = daily.day(0)?;

        let mut weekly = Vec::with_capacity(FORECAST_DAYS);
        for idx in 0..FORECAST_DAYS {
            let reading = daily.day(idx)?;
            weekly.push(DayForecast {
                date: short_date(daily.date_str(idx)?)?,
                kind: WeatherKind::from_code(reading.code),
                temp_max: round_temp(reading.temp_max),
                temp_min: round_temp(reading.temp_min),
            });
        }

        let pos = map_position(location);
        Ok(Self {
            name: location.name.to_string(),
            top: pos.top,
            left: pos.left,
            today_max: round_temp(today.temp_max),
            today_min: round_temp(today.temp_min),
            current_type: WeatherKind::from_code(today.code),
            weekly,
        })
    }
}

/// One card of the national grid.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub name: String,
    pub icon: &'static str,
    pub temp_max: i64,
    pub temp_min: i64,
}

impl WeatherCard {
    pub fn from_forecast(location: &Location, daily: &DailyForecast) -> Result<Self, WeatherError> {
        let today = daily.day(0)?;
        Ok(Self {
            name: location.name.to_string(),
            icon: card_icon(today.code),
            temp_max: round_temp(today.temp_max),
            temp_min: round_temp(today.temp_min),
        })
    }
}

// --- Collection ---

async fn city_weather(
    source: &dyn ForecastSource,
    location: &Location,
) -> Result<CityWeather, WeatherError> {
    let daily = source
        .daily_forecast(location.latitude, location.longitude)
        .await?;
    CityWeather::from_forecast(location, &daily)
}

/// Fetches every location in order. A failing city is replaced by its
/// placeholder so the result always matches `locations` one to one.
pub async fn collect_monitor(
    source: &dyn ForecastSource,
    locations: &[Location],
) -> Vec<CityWeather> {
    let mut cities = Vec::with_capacity(locations.len());
    for location in locations {
        match city_weather(source, location).await {
            Ok(weather) => {
                info!("Forecast collected for {}", location.name);
                cities.push(weather);
            }
            Err(e) => {
                warn!("Forecast for {} failed: {}. Using placeholder.", location.name, e);
                cities.push(CityWeather::placeholder(location));
            }
        }
    }
    cities
}

/// Fetches every location in order, leaving failing cities out.
pub async fn collect_cards(source: &dyn ForecastSource, locations: &[Location]) -> Vec<WeatherCard> {
    let mut cards = Vec::with_capacity(locations.len());
    for location in locations {
        let card = match source
            .daily_forecast(location.latitude, location.longitude)
            .await
        {
            Ok(daily) => WeatherCard::from_forecast(location, &daily),
            Err(e) => Err(e),
        };
        match card {
            Ok(card) => {
                info!("Forecast collected for {}", location.name);
                cards.push(card);
            }
            Err(e) => warn!("Forecast for {} failed: {}. Skipping card.", location.name, e),
        }
    }
    cards
}
