use dotenvy::dotenv;
use history_loader::{BatchLoader, LoaderConfig, NIFTY_50};
use log::{error, info, warn};
use nse_api::NseAPI;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use std::{env, process::exit};

const WORKERS_VAR: &str = "NIFTY_LOADER_WORKERS";
const DATA_DIR_VAR: &str = "NIFTY_LOADER_DATA_DIR";
const PERIOD_VAR: &str = "NIFTY_LOADER_PERIOD";
const TIMEOUT_VAR: &str = "NIFTY_LOADER_TIMEOUT_SECS";

struct Config {
    loader: LoaderConfig,
}

impl Config {
    fn new() -> Result<Config, Box<dyn Error>> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults, overridden by whichever variables `lookup` knows. Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, Box<dyn Error>> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut loader = LoaderConfig::default();

        if let Some(workers) = lookup(WORKERS_VAR) {
            loader.workers = workers.trim().parse()?;
        }
        if loader.workers == 0 {
            loader.workers = 1;
        }

        if let Some(data_dir) = lookup(DATA_DIR_VAR) {
            loader.data_dir = data_dir.trim().into();
        }

        if let Some(period) = lookup(PERIOD_VAR) {
            loader.period = period.parse()?;
        }

        if let Some(secs) = lookup(TIMEOUT_VAR) {
            loader.request_timeout = Duration::from_secs(secs.trim().parse()?);
        }

        Ok(Config { loader })
    }
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Could not create config: {}", e);
            exit(1);
        }
    };

    let nse_api = match NseAPI::new(config.loader.request_timeout) {
        Ok(api) => api,
        Err(e) => {
            error!("Could not create NSE client: {}", e);
            exit(1);
        }
    };

    let loader = match BatchLoader::new(Arc::new(nse_api), &config.loader) {
        Ok(loader) => loader,
        Err(e) => {
            error!(
                "Could not create data directory {}: {}",
                config.loader.data_dir.display(),
                e
            );
            exit(1);
        }
    };
    info!(
        "Saving {} of history to {}",
        config.loader.period,
        loader.writer().dir().display()
    );

    let report = loader.run(NIFTY_50).await;

    // best-effort run: permanent failures are reported, not turned into an exit code
    if !report.failed.is_empty() {
        warn!("No update for: {}", report.failed.join(", "));
    }
}
