use futures::stream::{self, StreamExt};
use history_model::{HistoryProvider, Period};
use log::{error, info};
use std::sync::Arc;

use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::fetcher::Fetcher;
use crate::writer::CsvWriter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub recovered: Vec<String>,
    // files of failed symbols are left untouched
    pub failed: Vec<String>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.succeeded.len() + self.recovered.len()
    }
}

pub struct BatchLoader {
    fetcher: Fetcher,
    writer: CsvWriter,
    workers: usize,
    period: Period,
}

impl BatchLoader {
    pub fn new(provider: Arc<dyn HistoryProvider>, config: &LoaderConfig) -> Result<Self, LoadError> {
        Ok(BatchLoader {
            fetcher: Fetcher::new(provider),
            writer: CsvWriter::create(&config.data_dir)?,
            workers: config.workers.max(1),
            period: config.period,
        })
    }

    pub fn writer(&self) -> &CsvWriter {
        &self.writer
    }

    pub async fn load_symbol(&self, symbol: &str) -> Result<usize, LoadError> {
        let table = self.fetcher.fetch(symbol, self.period).await?;
        self.writer.write(&table).await
    }

    pub async fn run<S: AsRef<str>>(&self, symbols: &[S]) -> BatchReport {
        info!(
            "🚀 Starting download of {} symbols with {} workers...",
            symbols.len(),
            self.workers
        );

        // a new unit starts as soon as any running one finishes
        let mut outcomes: Vec<(usize, bool)> = stream::iter(symbols.iter().enumerate())
            .map(|(index, symbol)| async move {
                let symbol = symbol.as_ref();
                match self.load_symbol(symbol).await {
                    Ok(_) => {
                        info!("✅ {}", symbol);
                        (index, true)
                    }
                    Err(e) => {
                        error!("❌ {}: {}", symbol, e);
                        (index, false)
                    }
                }
            })
            .buffer_unordered(self.workers)
            .collect()
            .await;
        outcomes.sort_unstable_by_key(|(index, _)| *index);

        let mut report = BatchReport::default();
        let mut retry = Vec::new();
        for (index, ok) in outcomes {
            let symbol = symbols[index].as_ref().to_string();
            if ok {
                report.succeeded.push(symbol);
            } else {
                retry.push(symbol);
            }
        }

        if !retry.is_empty() {
            info!("🔁 Retrying {} failed downloads...", retry.len());
            for symbol in retry {
                match self.load_symbol(&symbol).await {
                    Ok(_) => {
                        info!("✅ Retry success: {}", symbol);
                        report.recovered.push(symbol);
                    }
                    Err(e) => {
                        error!("❌ Retry failed: {}: {}", symbol, e);
                        report.failed.push(symbol);
                    }
                }
            }
        }

        info!(
            "Done: {} written ({} on retry), {} failed",
            report.written(),
            report.recovered.len(),
            report.failed.len()
        );
        report
    }
}
