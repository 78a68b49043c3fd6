use history_model::{ParseError, ProviderError};
use thiserror::Error;

/// Why a symbol's fetch-and-write unit failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    #[error("parse: {0}")]
    Parse(#[from] ParseError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("symbol '{0}' has no usable file name")]
    InvalidSymbol(String),
}
