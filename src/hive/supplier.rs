//! Extraction pipeline: catalog → asset records
//!
//! For each database (minus the engine's system schemas) the supplier emits a database
//! asset, then one table asset per table. Table columns come from `DESCRIBE EXTENDED` via
//! the [row classifier](crate::hive::describe); when the describe fails, they are recovered
//! from a zero-row probe instead, without a detail section.
//!
//! The watermark only advances when the whole catalog walk succeeds.

use crate::hive::assets::{Asset, AssetBuilder};
use crate::hive::catalog::{Catalog, CatalogError};
use crate::hive::config::HiveConfig;
use crate::hive::describe::{classify, Classification};
use crate::hive::notation::DetailedTableInfoMode;
use crate::hive::state::{StateError, StateRepository};
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

/// System schemas never published as assets
pub const SKIPPED_DATABASES: &[&str] = &["information_schema", "sys"];

#[derive(Debug, thiserror::Error)]
pub enum SupplierError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("failed to publish asset: {0}")]
    Publish(#[from] io::Error),
}

/// Receives every asset built during a run
pub trait AssetCallback {
    fn on_asset_updated(&mut self, asset: Asset) -> io::Result<()>;
}

impl AssetCallback for Vec<Asset> {
    fn on_asset_updated(&mut self, asset: Asset) -> io::Result<()> {
        self.push(asset);
        Ok(())
    }
}

/// Writes each asset as one line of JSON
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AssetCallback for JsonLinesSink<W> {
    fn on_asset_updated(&mut self, asset: Asset) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &asset)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Counters for one completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub databases: usize,
    pub tables: usize,
    /// Tables whose columns came from the probe because `DESCRIBE` failed
    pub describe_fallbacks: usize,
    pub previous_watermark: i64,
    pub watermark: i64,
}

/// Milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

pub fn should_skip_database(database: &str) -> bool {
    SKIPPED_DATABASES.contains(&database)
}

pub struct AssetsSupplier<C, S> {
    catalog: C,
    state: S,
    builder: AssetBuilder,
    host: String,
    mode: DetailedTableInfoMode,
    clock: fn() -> i64,
}

impl<C: Catalog, S: StateRepository> AssetsSupplier<C, S> {
    pub fn new(config: &HiveConfig, catalog: C, state: S) -> Self {
        Self {
            catalog,
            state,
            builder: AssetBuilder::from_config(config),
            host: config.connection.host.clone(),
            mode: config.assets.detailed_table_info,
            clock: now_millis,
        }
    }

    /// Replace the wall clock used for `updatedAt` and the watermark
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Walk the catalog and hand every asset to `callback`
    pub fn fetch_assets(
        &mut self,
        callback: &mut dyn AssetCallback,
    ) -> Result<SyncReport, SupplierError> {
        let previous_watermark = self.state.last_updated_at()?;
        let started_at = (self.clock)();
        info!(host = %self.host, previous_watermark, "synchronizing hive assets");

        let mut report = SyncReport {
            previous_watermark,
            ..SyncReport::default()
        };

        for database in self.catalog.show_databases()? {
            if should_skip_database(&database) {
                debug!(%database, "skipping system database");
                continue;
            }

            info!(%database, "processing database");
            callback.on_asset_updated(self.builder.database_asset(&database, (self.clock)()))?;
            report.databases += 1;

            for table in self.catalog.show_tables(&database)? {
                debug!(%database, %table, "processing table");
                let (classification, fell_back) = self.describe_table(&database, &table);
                if fell_back {
                    report.describe_fallbacks += 1;
                }
                let asset =
                    self.builder
                        .table_asset(&database, &table, classification, (self.clock)());
                callback.on_asset_updated(asset)?;
                report.tables += 1;
            }
            info!(%database, "completed database");
        }

        self.state.set_last_updated_at(started_at)?;
        report.watermark = started_at;
        Ok(report)
    }

    /// Columns and detail for one table; the flag is set when the probe fallback was used
    fn describe_table(&mut self, database: &str, table: &str) -> (Classification, bool) {
        match self.catalog.describe_extended(database, table) {
            Ok(rows) => {
                let classification = classify(rows, self.mode);
                if classification.detail.is_none() {
                    debug!(%database, %table, "no detailed table information found");
                }
                (classification, false)
            }
            Err(err) => {
                warn!(%database, %table, error = %err, "could not describe table, probing columns");
                match self.catalog.probe_columns(database, table) {
                    Ok(probe) => (Classification::from_probe(probe), true),
                    Err(err) => {
                        error!(%database, %table, error = %err, "could not extract columns");
                        (Classification::default(), true)
                    }
                }
            }
        }
    }
}
