use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use history_model::{HistoryProvider, Period, ProviderError, RawTable, Schema};
use log::debug;
use reqwest::header::REFERER;
use std::time::Duration;

use crate::columns::PRICE_VOLUME_SCHEMA;

const NSE_BASE_URL: &str = "https://www.nseindia.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
// the archive rejects ranges longer than a year
const MAX_WINDOW_DAYS: u64 = 365;
const QUERY_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Clone)]
pub struct NseAPI {
    base_url: String,
    client: reqwest::Client,
}

impl NseAPI {
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        Self::with_base_url(NSE_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(request_error)?;

        Ok(NseAPI {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Daily price/volume rows for `symbol` between `from` and `to`, inclusive.
    pub async fn get_price_volume(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RawTable, ProviderError> {
        self.open_session().await?;

        let mut table = RawTable::default();
        for (window_from, window_to) in date_windows(from, to, MAX_WINDOW_DAYS) {
            let window = self
                .get_price_volume_window(symbol, window_from, window_to)
                .await?;
            table.extend(window);
        }

        if table.is_empty() {
            return Err(ProviderError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        Ok(table)
    }

    // the archive endpoint only answers clients holding the cookies set by the home page;
    // the page status itself does not matter
    async fn open_session(&self) -> Result<(), ProviderError> {
        debug!("open_session | url: {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(request_error)?;
        if let Err(e) = check_status(&response) {
            debug!("open_session | ignoring {}", e);
        }
        Ok(())
    }

    async fn get_price_volume_window(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RawTable, ProviderError> {
        let url = format!("{}/api/historical/securityArchives", self.base_url);
        let from = from.format(QUERY_DATE_FORMAT).to_string();
        let to = to.format(QUERY_DATE_FORMAT).to_string();

        debug!(
            "get_price_volume_window | url: {} | symbol: {} | from: {} | to: {}",
            url, symbol, from, to
        );

        let response = self
            .client
            .get(&url)
            .header(
                REFERER,
                format!("{}/get-quotes/equity?symbol={}", self.base_url, symbol),
            )
            .query(&[
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("symbol", symbol),
                ("dataType", "priceVolume"),
                ("series", "ALL"),
                ("csv", "true"),
            ])
            .send()
            .await
            .map_err(request_error)?;
        check_status(&response)?;

        let body = response.text().await.map_err(request_error)?;
        parse_price_volume_csv(&body)
    }
}

#[async_trait]
impl HistoryProvider for NseAPI {
    fn name(&self) -> &str {
        "NSE"
    }

    fn schema(&self) -> &Schema {
        &PRICE_VOLUME_SCHEMA
    }

    async fn price_volume(&self, symbol: &str, period: Period) -> Result<RawTable, ProviderError> {
        let (from, to) = period.range_ending(chrono::Local::now().date_naive());
        self.get_price_volume(symbol, from, to).await
    }
}

/// Reads the archive CSV export. Header names lose all whitespace
/// (`"Open Price "` becomes `OpenPrice`) and cells are trimmed.
pub fn parse_price_volume_csv(body: &str) -> Result<RawTable, ProviderError> {
    if body.trim().is_empty() {
        return Ok(RawTable::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(|name| {
            name.chars()
                .filter(|c| !c.is_whitespace() && *c != '\u{feff}')
                .collect()
        })
        .collect();

    if !header.iter().any(|name| name == "Date") {
        return Err(ProviderError::Malformed(format!(
            "no Date column in header {:?}",
            header
        )));
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(RawTable::from_records(&header, records))
}

/// Splits `from..=to` into consecutive windows spanning at most `max_days` days.
fn date_windows(from: NaiveDate, to: NaiveDate, max_days: u64) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::new();
    let mut start = from;

    while start <= to {
        let end = start
            .checked_add_days(Days::new(max_days.saturating_sub(1)))
            .map_or(to, |end| end.min(to));
        windows.push((start, end));
        match end.succ_opt() {
            Some(next) => start = next,
            None => break,
        }
    }

    windows
}

fn check_status(response: &reqwest::Response) -> Result<(), ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(ProviderError::Status {
        status: status.as_u16(),
        url: response.url().to_string(),
    })
}

fn request_error(err: reqwest::Error) -> ProviderError {
    ProviderError::Request(err.to_string())
}

fn malformed(err: csv::Error) -> ProviderError {
    ProviderError::Malformed(err.to_string())
}
