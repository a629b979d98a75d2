// src/sheets_client.rs
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const GOOGLE_SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";
pub const EMPLOYEE_TAB: &str = "emp_data";
pub const SCHEDULE_TAB: &str = "schedule_data";

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),

    #[error("URL parsing error")]
    UrlParse(#[from] url::ParseError),

    #[error("Sheet export returned an error: Status={status}")]
    Status { status: StatusCode },

    #[error("CSV parsing error")]
    Csv(#[from] csv::Error),
}

#[derive(Clone, Debug)]
pub struct SheetConfig {
    pub sheet_id: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Reads tabs of a published spreadsheet through the gviz CSV export.
#[derive(Clone)]
pub struct SheetClient {
    config: SheetConfig,
    http_client: Client,
}

impl SheetClient {
    pub fn new(config: SheetConfig) -> Result<Self, SheetError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// `{base}/{sheet_id}/gviz/tq?tqx=out:csv&sheet={tab}`
    pub fn export_url(&self, tab: &str) -> Result<Url, SheetError> {
        let base = format!(
            "{}/{}/gviz/tq",
            self.config.base_url.trim_end_matches('/'),
            self.config.sheet_id
        );
        Ok(Url::parse_with_params(
            &base,
            &[("tqx", "out:csv"), ("sheet", tab)],
        )?)
    }

    pub async fn fetch_rows(&self, tab: &str) -> Result<Vec<Vec<String>>, SheetError> {
        let url = self.export_url(tab)?;
        debug!("Fetching sheet tab '{}' from {}", tab, url);

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::Status { status });
        }

        // The export is UTF-8 regardless of what the headers claim
        let bytes = response.bytes().await?;
        let text = String::from_utf8_lossy(&bytes);
        let rows = parse_csv_rows(&text)?;
        info!("Fetched {} rows from sheet tab '{}'", rows.len(), tab);
        Ok(rows)
    }

    /// Like `fetch_rows`, but a failure is logged and reads as an empty sheet.
    pub async fn fetch_rows_or_empty(&self, tab: &str) -> Vec<Vec<String>> {
        match self.fetch_rows(tab).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to fetch sheet tab '{}': {}. Treating it as empty.", tab, e);
                Vec::new()
            }
        }
    }
}

/// Splits CSV text into rows of raw fields. Record lengths may vary; the
/// header row is returned like any other row.
pub fn parse_csv_rows(text: &str) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
