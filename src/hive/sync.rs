//! Polling loop driving the supplier

use crate::hive::catalog::Catalog;
use crate::hive::state::StateRepository;
use crate::hive::supplier::{AssetCallback, AssetsSupplier, SyncReport};
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

pub struct Synchronizer<C, S, K> {
    connector_id: String,
    supplier: AssetsSupplier<C, S>,
    sink: K,
    poll_interval: Duration,
}

impl<C: Catalog, S: StateRepository, K: AssetCallback> Synchronizer<C, S, K> {
    pub fn new(
        connector_id: impl Into<String>,
        supplier: AssetsSupplier<C, S>,
        sink: K,
        poll_interval: Duration,
    ) -> Self {
        Self {
            connector_id: connector_id.into(),
            supplier,
            sink,
            poll_interval,
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn supplier(&self) -> &AssetsSupplier<C, S> {
        &self.supplier
    }

    /// One full sync. Failures are logged and reported as `None`; the next cycle retries.
    pub fn run_once(&mut self) -> Option<SyncReport> {
        match self.supplier.fetch_assets(&mut self.sink) {
            Ok(report) => {
                info!(
                    connector = %self.connector_id,
                    databases = report.databases,
                    tables = report.tables,
                    describe_fallbacks = report.describe_fallbacks,
                    "sync completed"
                );
                Some(report)
            }
            Err(err) => {
                error!(connector = %self.connector_id, error = %err, "sync failed");
                None
            }
        }
    }

    /// Sync immediately, then every `poll_interval`, until `shutdown` resolves.
    ///
    /// Returns the number of cycles run.
    pub async fn run<F>(&mut self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut cycles = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(connector = %self.connector_id, cycles, "stopping synchronizer");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_once();
                    cycles += 1;
                }
            }
        }
        cycles
    }
}
