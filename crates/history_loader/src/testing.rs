use async_trait::async_trait;
use history_model::{HistoryProvider, Period, ProviderError, RawTable, Schema};
use log::{LevelFilter, Log, Metadata, Record};
use nse_api::PRICE_VOLUME_SCHEMA;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const HEADER: [&str; 8] = [
    "Symbol",
    "Series",
    "Date",
    "OpenPrice",
    "HighPrice",
    "LowPrice",
    "ClosePrice",
    "TotalTradedQuantity",
];

// newest first; the 03-Jan close encodes the attempt number
pub(crate) fn archive_rows(symbol: &str, attempt: usize) -> RawTable {
    RawTable::from_records(
        &HEADER,
        vec![
            vec![
                symbol.to_string(),
                "EQ".to_string(),
                "03-Jan-2024".to_string(),
                "1,001.00".to_string(),
                "1,010.00".to_string(),
                "995.00".to_string(),
                format!("1,00{}.50", attempt),
                "12,345".to_string(),
            ],
            vec![
                symbol.to_string(),
                "EQ".to_string(),
                "02-Jan-2024".to_string(),
                "990.00".to_string(),
                "1,002.00".to_string(),
                "985.25".to_string(),
                "1,000.00".to_string(),
                "10,000".to_string(),
            ],
        ],
    )
}

#[derive(Default)]
pub(crate) struct ScriptedProvider {
    delay: Duration,
    failures: Mutex<HashMap<String, usize>>,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn failing(self, symbol: &str, times: usize) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(symbol.to_string(), times);
        self
    }

    pub(crate) fn calls(&self, symbol: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn schema(&self) -> &Schema {
        &PRICE_VOLUME_SCHEMA
    }

    async fn price_volume(&self, symbol: &str, _period: Period) -> Result<RawTable, ProviderError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(symbol.to_string()).or_default();
            *count += 1;
            *count
        };

        let fail = match self.failures.lock().unwrap().get_mut(symbol) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        };
        if fail {
            return Err(ProviderError::Request(format!(
                "connection reset while fetching {}",
                symbol
            )));
        }

        Ok(archive_rows(symbol, attempt))
    }
}

pub(crate) struct FixedProvider(pub(crate) RawTable);

#[async_trait]
impl HistoryProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn schema(&self) -> &Schema {
        &PRICE_VOLUME_SCHEMA
    }

    async fn price_volume(&self, _symbol: &str, _period: Period) -> Result<RawTable, ProviderError> {
        Ok(self.0.clone())
    }
}

static CAPTURE: CaptureLog = CaptureLog {
    lines: Mutex::new(Vec::new()),
};

struct CaptureLog {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LevelFilter::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

/// Routes `info` and above into memory for the whole test binary.
pub(crate) fn capture_logs() {
    if log::set_logger(&CAPTURE).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

pub(crate) fn logged_lines(needle: &str) -> Vec<String> {
    CAPTURE
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.contains(needle))
        .cloned()
        .collect()
}
