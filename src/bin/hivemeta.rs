//! Command-line interface for hivemeta
//!
//! Usage:
//!   hivemeta decode [`<path>`] [--mode `<mode>`] [--compact]   - Decode a Detailed Table Information blob
//!   hivemeta sync --catalog `<fixture>` [--state `<file>`] [--once] - Publish assets as JSON lines
//!   hivemeta show-config                                   - Print the effective configuration
#[path = "hivemeta/logging.rs"]
mod logging;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use hivemeta::hive::catalog::FixtureCatalog;
use hivemeta::hive::config::{HiveConfig, Loader};
use hivemeta::hive::notation::{decode, DetailedTableInfoMode};
use hivemeta::hive::state::{FileStateRepository, MemoryStateRepository, StateRepository};
use hivemeta::hive::supplier::{AssetsSupplier, JsonLinesSink};
use hivemeta::hive::sync::Synchronizer;
use std::io::{self, Read};
use tracing::{info, warn};

fn cli() -> Command {
    Command::new("hivemeta")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Harvest Hive table metadata as asset records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log level when RUST_LOG is unset")
                .default_value("warn"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode Hive object notation into JSON")
                .arg(
                    Arg::new("path")
                        .help("File holding the notation, or '-' for stdin")
                        .default_value("-")
                        .index(1),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .short('m')
                        .help("structured, raw or ignore (defaults to the configured mode)")
                        .value_parser(clap::value_parser!(DetailedTableInfoMode)),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Print JSON on a single line")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Walk a catalog and print one JSON asset per line")
                .arg(
                    Arg::new("catalog")
                        .long("catalog")
                        .help("Catalog fixture (YAML or JSON)")
                        .required(true),
                )
                .arg(
                    Arg::new("state")
                        .long("state")
                        .help("JSON file keeping the sync watermark between runs"),
                )
                .arg(
                    Arg::new("once")
                        .long("once")
                        .help("Run a single sync instead of polling")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("show-config").about("Print the effective configuration"))
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    logging::init(log_level);

    let config = load_config(matches.get_one::<String>("config"))?;

    match matches.subcommand() {
        Some(("decode", decode_matches)) => handle_decode_command(decode_matches, &config),
        Some(("sync", sync_matches)) => handle_sync_command(sync_matches, &config),
        Some(("show-config", _)) => handle_show_config_command(&config),
        _ => unreachable!(),
    }
}

fn load_config(path: Option<&String>) -> Result<HiveConfig> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader
        .with_environment()
        .build()
        .context("failed to load configuration")
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
}

/// Handle the decode command
fn handle_decode_command(matches: &ArgMatches, config: &HiveConfig) -> Result<()> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let mode = matches
        .get_one::<DetailedTableInfoMode>("mode")
        .copied()
        .unwrap_or(config.assets.detailed_table_info);

    let source = read_input(path)?;
    let Some(outcome) = decode(&source, mode) else {
        info!(%mode, "nothing to decode");
        return Ok(());
    };

    let rendered = if matches.get_flag("compact") {
        serde_json::to_string(&outcome)?
    } else {
        serde_json::to_string_pretty(&outcome)?
    };
    println!("{}", rendered);
    Ok(())
}

/// Handle the sync command
fn handle_sync_command(matches: &ArgMatches, config: &HiveConfig) -> Result<()> {
    if !config.assets.enabled {
        warn!("asset synchronization is disabled (assets.enabled = false)");
        return Ok(());
    }

    let catalog_path = matches
        .get_one::<String>("catalog")
        .context("--catalog is required")?;
    let catalog = FixtureCatalog::from_path(catalog_path)?;
    let once = matches.get_flag("once");

    match matches.get_one::<String>("state") {
        Some(path) => run_sync(config, catalog, FileStateRepository::new(path), once),
        None => run_sync(config, catalog, MemoryStateRepository::new(), once),
    }
}

fn run_sync<S: StateRepository>(
    config: &HiveConfig,
    catalog: FixtureCatalog,
    state: S,
    once: bool,
) -> Result<()> {
    let supplier = AssetsSupplier::new(config, catalog, state);
    let mut synchronizer = Synchronizer::new(
        config.assets.connector_id.clone(),
        supplier,
        JsonLinesSink::new(io::stdout()),
        config.assets.poll_interval,
    );

    if once {
        if synchronizer.run_once().is_none() {
            bail!("sync failed");
        }
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    runtime.block_on(synchronizer.run(async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "could not listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }));
    Ok(())
}

/// Handle the show-config command
fn handle_show_config_command(config: &HiveConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
