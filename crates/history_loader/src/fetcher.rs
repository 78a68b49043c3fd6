use history_model::{HistoryProvider, Period, PriceTable};
use log::debug;
use std::sync::Arc;

use crate::error::LoadError;

/// Pulls raw rows from a provider and normalizes them with the provider's schema.
#[derive(Clone)]
pub struct Fetcher {
    provider: Arc<dyn HistoryProvider>,
}

impl Fetcher {
    pub fn new(provider: Arc<dyn HistoryProvider>) -> Self {
        Fetcher { provider }
    }

    pub async fn fetch(&self, symbol: &str, period: Period) -> Result<PriceTable, LoadError> {
        let raw = self.provider.price_volume(symbol, period).await?;
        debug!(
            "fetch | provider: {} | symbol: {} | period: {} | raw rows: {}",
            self.provider.name(),
            symbol,
            period,
            raw.len()
        );

        let table = self.provider.schema().normalize(symbol, &raw)?;
        Ok(table)
    }
}
