use history_model::PriceTable;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::utils::sanitize_symbol;

const HEADER: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Writes one `<symbol>.csv` per table into a fixed directory.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    dir: PathBuf,
}

impl CsvWriter {
    /// Creates `dir` (and its parents) if missing.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(CsvWriter { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, symbol: &str) -> Result<PathBuf, LoadError> {
        // a rewritten name could collide with another symbol's file
        let name = sanitize_symbol(symbol);
        if name.is_empty() || name != symbol {
            return Err(LoadError::InvalidSymbol(symbol.to_string()));
        }
        Ok(self.dir.join(format!("{}.csv", name)))
    }

    /// Replaces the symbol's file with `table`, returning the number of data rows.
    /// The previous file survives any failure.
    pub async fn write(&self, table: &PriceTable) -> Result<usize, LoadError> {
        let path = self.path_for(&table.symbol)?;
        let tmp = path.with_extension("csv.tmp");
        let bytes = to_csv(table)?;

        debug!("write | path: {} | rows: {}", path.display(), table.len());

        let replaced = match tokio::fs::write(&tmp, &bytes).await {
            Ok(()) => tokio::fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = replaced {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        Ok(table.len())
    }
}

/// Serializes `table` with the canonical header, which is present even when
/// the table has no rows.
pub fn to_csv(table: &PriceTable) -> Result<Vec<u8>, LoadError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in &table.records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| LoadError::Io(io::Error::other(e.to_string())))
}
