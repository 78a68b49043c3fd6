pub mod batch;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod symbols;
pub mod utils;
pub mod writer;

pub use batch::{BatchLoader, BatchReport};
pub use config::LoaderConfig;
pub use error::LoadError;
pub use fetcher::Fetcher;
pub use symbols::NIFTY_50;
pub use writer::CsvWriter;

#[cfg(test)]
pub(crate) mod testing;
