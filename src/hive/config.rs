//! Connector configuration.
//!
//! `defaults/hivemeta.default.toml` is compiled in and always forms the bottom layer, so a
//! bare `hivemeta sync` talks to `localhost:10000` and decodes detail blobs as trees.
//! [`Loader`] stacks a user TOML file and `HIVEMETA_*` environment variables on top before
//! deserializing into [`HiveConfig`].

use crate::hive::notation::DetailedTableInfoMode;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../../defaults/hivemeta.default.toml");

/// Prefix for environment overrides; nested keys use `__` (`HIVEMETA_ASSETS__OWNER`).
pub const ENV_PREFIX: &str = "HIVEMETA";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiveConfig {
    pub connection: ConnectionConfig,
    pub assets: AssetsConfig,
}

/// Where the HiveServer2/Impala endpoint lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Asset synchronization knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub enabled: bool,
    pub connector_id: String,
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    #[serde(default)]
    pub detailed_table_info: DetailedTableInfoMode,
    #[serde(default)]
    pub id_prefix: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

/// Layered source list for [`HiveConfig`]; later layers win.
///
/// Order used by the CLI: embedded defaults, then `--config <file>`, then `HIVEMETA_*`.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only `hivemeta.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    fn add_toml_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add a connector TOML file; [`build`](Self::build) fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_toml_file(path.as_ref(), true)
    }

    /// Add a connector TOML file that may be absent, such as a per-host override.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_toml_file(path.as_ref(), false)
    }

    /// Add `HIVEMETA_*` variables, e.g. `HIVEMETA_CONNECTION__HOST=metastore`.
    pub fn with_environment(mut self) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );
        self
    }

    /// Pin one dotted key (`assets.detailed_table_info`) above every other layer.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and deserialize; unknown mode names and bad durations fail here.
    pub fn build(self) -> Result<HiveConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in connector settings with no user layers.
pub fn load_defaults() -> Result<HiveConfig, ConfigError> {
    Loader::new().build()
}
