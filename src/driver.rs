// Fetch -> analyze -> export -> persist loop
use crate::analyzer::Analyzer;
use crate::exporter::{export, SnapshotWorkbook};
use crate::fetcher::Fetcher;
use crate::model::StorageError;
use crate::report::render_summary;
use crate::storage::SnapshotStore;

use chrono::Utc;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source returned nothing (or failed). Terminal by design.
    SourceExhausted,
    /// The stop signal fired while waiting for the next cycle.
    StopRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Cycles that were persisted.
    pub cycles: u64,
    pub reason: StopReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleOutcome {
    Persisted { assets: usize },
    NoData,
}

pub struct Driver<'a, W: Write> {
    fetcher: &'a dyn Fetcher,
    analyzer: &'a dyn Analyzer,
    store: &'a mut dyn SnapshotStore,
    interval: Duration,
    stop: Arc<Notify>,
    out: W,
}

impl<'a, W: Write> Driver<'a, W> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        analyzer: &'a dyn Analyzer,
        store: &'a mut dyn SnapshotStore,
        interval: Duration,
        stop: Arc<Notify>,
        out: W,
    ) -> Self {
        Self { fetcher, analyzer, store, interval, stop, out }
    }

    /// Runs cycles until the source yields nothing or the stop signal fires.
    /// A persistence failure ends the loop with an error.
    pub async fn run(&mut self, workbook: &mut SnapshotWorkbook) -> Result<RunReport, StorageError> {
        let mut cycles = 0;
        loop {
            match self.run_cycle(workbook).await? {
                CycleOutcome::NoData => {
                    info!("No data received, stopping after {} cycle(s).", cycles);
                    return Ok(RunReport { cycles, reason: StopReason::SourceExhausted });
                }
                CycleOutcome::Persisted { assets } => {
                    cycles += 1;
                    info!(
                        "Cycle {}: {} assets written. Next update in {}s...",
                        cycles,
                        assets,
                        self.interval.as_secs()
                    );
                }
            }

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = self.stop.notified() => {
                    info!("Stop requested, exiting loop.");
                    return Ok(RunReport { cycles, reason: StopReason::StopRequested });
                }
            }
        }
    }

    async fn run_cycle(&mut self, workbook: &mut SnapshotWorkbook) -> Result<CycleOutcome, StorageError> {
        let records = match self.fetcher.fetch().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Error: {}", e);
                return Ok(CycleOutcome::NoData);
            }
        };
        if records.is_empty() {
            return Ok(CycleOutcome::NoData);
        }

        match self.analyzer.analyze(&records) {
            Ok(summary) => {
                let text = render_summary(&summary, Utc::now());
                if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
                    warn!("Failed to print analysis: {}", e);
                }
            }
            Err(e) => warn!("Analysis failed: {}", e),
        }

        export(&records, workbook.active_mut());
        self.store.persist(workbook)?;

        Ok(CycleOutcome::Persisted { assets: records.len() })
    }
}
