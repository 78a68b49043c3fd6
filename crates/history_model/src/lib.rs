use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod normalize;
pub mod period;
pub mod provider;
pub mod raw;

pub use normalize::{ColumnRule, Coercion, Field, ParseError, Schema};
pub use period::{InvalidPeriod, Period};
pub use provider::{HistoryProvider, ProviderError};
pub use raw::{RawRow, RawTable};

/// One trading day in the canonical schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub symbol: String,
    pub records: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn new(symbol: &str, records: Vec<PriceRecord>) -> Self {
        PriceTable {
            symbol: symbol.to_string(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
