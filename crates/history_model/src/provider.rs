use async_trait::async_trait;
use thiserror::Error;

use crate::normalize::Schema;
use crate::period::Period;
use crate::raw::RawTable;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("no data for symbol '{symbol}'")]
    SymbolNotFound { symbol: String },
}

/// A market-data source returning raw daily price/volume rows.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Column layout of the rows returned by [`HistoryProvider::price_volume`].
    fn schema(&self) -> &Schema;

    async fn price_volume(&self, symbol: &str, period: Period) -> Result<RawTable, ProviderError>;
}
