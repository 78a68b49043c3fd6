use history_model::Period;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Upper bound on symbols fetched concurrently during the first pass.
    pub workers: usize,
    pub period: Period,
    pub data_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            workers: DEFAULT_WORKERS,
            period: Period::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
