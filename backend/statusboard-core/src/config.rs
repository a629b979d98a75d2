// src/config.rs
use chrono::{FixedOffset, Weekday};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::board::{BoardSettings, BoardVariant};
use crate::html::{PageOptions, SiteMeta};
use crate::sheets_client::{SheetConfig, EMPLOYEE_TAB, GOOGLE_SHEETS_BASE_URL, SCHEDULE_TAB};
use crate::weather_client::{OpenMeteoConfig, OPEN_METEO_BASE_URL};
use crate::week::offset_from_hours;

pub const ENV_PREFIX: &str = "STATUSBOARD_";
const DEFAULT_SHEET_ID: &str = "1dArVEO9Dkizz5FMxbbiRDv0K_n9ZfJu0JXlKI8Z89pI";

// --- Error Handling ---

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Environment configuration error: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// --- Environment Configuration ---

fn default_sheet_id() -> String {
    DEFAULT_SHEET_ID.to_string()
}
fn default_sheet_base_url() -> String {
    GOOGLE_SHEETS_BASE_URL.to_string()
}
fn default_employee_tab() -> String {
    EMPLOYEE_TAB.to_string()
}
fn default_schedule_tab() -> String {
    SCHEDULE_TAB.to_string()
}
fn default_utc_offset_hours() -> i32 {
    9
}
fn default_zone_label() -> String {
    "KST".to_string()
}
fn default_weekend_days() -> String {
    "sat,sun".to_string()
}
fn default_refresh_secs() -> u32 {
    3600
}
fn default_forecast_base_url() -> String {
    OPEN_METEO_BASE_URL.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_request_timeout_secs() -> u64 {
    30
}

/// Settings read from `STATUSBOARD_*` variables (a `.env` file is loaded first).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EnvConfig {
    #[serde(default = "default_sheet_id")]
    pub sheet_id: String,
    #[serde(default = "default_sheet_base_url")]
    pub sheet_base_url: String,
    #[serde(default = "default_employee_tab")]
    pub employee_tab: String,
    #[serde(default = "default_schedule_tab")]
    pub schedule_tab: String,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default = "default_zone_label")]
    pub zone_label: String,
    /// Comma separated weekday names, e.g. "sat,sun" or "fri,sat"
    #[serde(default = "default_weekend_days")]
    pub weekend_days: String,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u32,
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Publisher name; enables author and Open Graph tags
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_keywords: Option<String>,
    /// Public base URL the pages are served from
    #[serde(default)]
    pub site_url: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(pairs)?)
    }

    pub fn offset(&self) -> Result<FixedOffset, AppError> {
        offset_from_hours(self.utc_offset_hours).ok_or_else(|| {
            AppError::Config(format!(
                "UTC offset of {} hours is out of range",
                self.utc_offset_hours
            ))
        })
    }

    pub fn weekend(&self) -> Result<Vec<Weekday>, AppError> {
        parse_weekdays(&self.weekend_days)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sheet_config(&self) -> SheetConfig {
        SheetConfig {
            sheet_id: self.sheet_id.clone(),
            base_url: self.sheet_base_url.clone(),
            request_timeout: self.request_timeout(),
        }
    }

    pub fn forecast_config(&self) -> OpenMeteoConfig {
        OpenMeteoConfig {
            base_url: self.forecast_base_url.clone(),
            request_timeout: self.request_timeout(),
        }
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            refresh_secs: self.refresh_secs,
            zone_label: self.zone_label.clone(),
            site: self.site_name.as_ref().map(|name| SiteMeta {
                name: name.clone(),
                keywords: self.site_keywords.clone(),
            }),
            canonical_url: None,
        }
    }

    /// Page options for a file published under `site_url`.
    pub fn page_options_for(&self, file_name: &str) -> PageOptions {
        let mut options = self.page_options();
        options.canonical_url = self
            .site_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), file_name));
        options
    }

    pub fn board_settings(&self, variant: BoardVariant) -> Result<BoardSettings, AppError> {
        Ok(BoardSettings::for_variant(variant, self.weekend()?))
    }
}

/// Parses "sat,sun"-style lists. Blank entries are ignored, duplicates kept once.
pub fn parse_weekdays(raw: &str) -> Result<Vec<Weekday>, AppError> {
    let mut days = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day: Weekday = part
            .parse()
            .map_err(|_| AppError::Config(format!("Unknown weekday '{}'", part)))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = EnvConfig::from_pairs(Vec::new()).unwrap();

        assert_eq!(config.sheet_id, DEFAULT_SHEET_ID);
        assert_eq!(config.employee_tab, "emp_data");
        assert_eq!(config.schedule_tab, "schedule_data");
        assert_eq!(config.offset().unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(config.weekend().unwrap(), vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(config.page_options(), PageOptions::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn prefixed_variables_override_defaults() {
        let config = EnvConfig::from_pairs(pairs(&[
            ("STATUSBOARD_SHEET_ID", "other-sheet"),
            ("STATUSBOARD_UTC_OFFSET_HOURS", "-5"),
            ("STATUSBOARD_WEEKEND_DAYS", "fri, sat"),
            ("STATUSBOARD_REFRESH_SECS", "600"),
            ("STATUSBOARD_OUTPUT_DIR", "/srv/www"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.sheet_id, "other-sheet");
        assert_eq!(config.offset().unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(config.weekend().unwrap(), vec![Weekday::Fri, Weekday::Sat]);
        assert_eq!(config.page_options().refresh_secs, 600);
        assert_eq!(config.output_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.sheet_config().sheet_id, "other-sheet");
    }

    #[test]
    fn site_variables_fill_page_metadata() {
        let config = EnvConfig::from_pairs(pairs(&[
            ("STATUSBOARD_SITE_NAME", "Acme Research"),
            ("STATUSBOARD_SITE_URL", "https://example.com/boards/"),
        ]))
        .unwrap();

        let options = config.page_options_for("w1.html");

        assert_eq!(
            options.site,
            Some(SiteMeta {
                name: "Acme Research".to_string(),
                keywords: None,
            })
        );
        assert_eq!(
            options.canonical_url.as_deref(),
            Some("https://example.com/boards/w1.html")
        );
        assert_eq!(
            EnvConfig::from_pairs(Vec::new())
                .unwrap()
                .page_options_for("w1.html")
                .canonical_url,
            None
        );
    }

    #[test]
    fn malformed_number_is_an_env_error() {
        let result = EnvConfig::from_pairs(pairs(&[("STATUSBOARD_REFRESH_SECS", "hourly")]));
        assert!(matches!(result, Err(AppError::Env(_))));
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let config =
            EnvConfig::from_pairs(pairs(&[("STATUSBOARD_UTC_OFFSET_HOURS", "30")])).unwrap();
        assert!(matches!(config.offset(), Err(AppError::Config(_))));
    }

    #[test]
    fn parse_weekdays_accepts_names_and_rejects_junk() {
        assert_eq!(
            parse_weekdays("Saturday,sun,sat").unwrap(),
            vec![Weekday::Sat, Weekday::Sun]
        );
        assert!(parse_weekdays("").unwrap().is_empty());
        assert!(parse_weekdays("sat,someday").is_err());
    }
}
