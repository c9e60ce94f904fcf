mod analyzer;
mod config;
mod driver;
mod exporter;
mod fetcher;
mod model;
mod normalizer;
mod parser;
mod report;
mod storage;
mod utils;

use analyzer::AnalyzerImpl;
use config::load_config_or_default;
use driver::Driver;
use exporter::SnapshotWorkbook;
use fetcher::CoinGeckoFetcher;
use storage::XlsxStorage;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the per-cycle analysis
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Polling {} every {}s (currency: {}, per page: {}, top {}), writing {}",
        config.api_url,
        config.update_interval_seconds,
        config.vs_currency,
        config.per_page,
        config.top_n,
        config.output_path
    );

    let fetcher = match CoinGeckoFetcher::new(&config) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let analyzer = AnalyzerImpl::new(config.top_n);
    let mut storage = XlsxStorage::new(&config.output_path);
    let mut workbook = SnapshotWorkbook::new();

    // Ctrl-C is observed between cycles, after the current snapshot is saved
    let stop = Arc::new(Notify::new());
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, stopping after the current cycle...");
                stop.notify_one();
            }
        });
    }

    let mut driver = Driver::new(
        &fetcher,
        &analyzer,
        &mut storage,
        Duration::from_secs(config.update_interval_seconds),
        stop,
        std::io::stdout(),
    );

    match driver.run(&mut workbook).await {
        Ok(report) => {
            info!("Stopped after {} cycle(s): {:?}", report.cycles, report.reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to save {}: {}", config.output_path, e);
            ExitCode::FAILURE
        }
    }
}
