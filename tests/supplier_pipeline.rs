//! End-to-end extraction over the warehouse catalog fixture

use hivemeta::hive::assets::{Asset, DATABASE_ASSET_TYPE, TABLE_ASSET_TYPE};
use hivemeta::hive::config::{load_defaults, Loader};
use hivemeta::hive::notation::DecodeOutcome;
use hivemeta::hive::state::{FileStateRepository, MemoryStateRepository, StateRepository};
use hivemeta::hive::supplier::{AssetsSupplier, JsonLinesSink, SyncReport};
use hivemeta::hive::testing::Samples;
use serde_json::{json, Value};

fn fixed_clock() -> i64 {
    1_756_300_000_000
}

fn sync_warehouse() -> (Vec<Asset>, SyncReport) {
    let config = load_defaults().unwrap();
    let mut supplier =
        AssetsSupplier::new(&config, Samples::catalog("warehouse"), MemoryStateRepository::new())
            .with_clock(fixed_clock);
    let mut assets: Vec<Asset> = Vec::new();
    let report = supplier.fetch_assets(&mut assets).unwrap();
    (assets, report)
}

fn find<'a>(assets: &'a [Asset], id: &str) -> &'a Asset {
    assets
        .iter()
        .find(|asset| asset.id == id)
        .unwrap_or_else(|| panic!("no asset {}", id))
}

#[test]
fn test_report_counts() {
    let (_, report) = sync_warehouse();
    assert_eq!(
        report,
        SyncReport {
            databases: 2,
            tables: 5,
            describe_fallbacks: 2,
            previous_watermark: 0,
            watermark: fixed_clock(),
        }
    );
}

#[test]
fn test_assets_are_emitted_in_catalog_order() {
    let (assets, _) = sync_warehouse();
    let ids: Vec<&str> = assets.iter().map(|asset| asset.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "hive-localhost.default",
            "hive-localhost.default.hive_example",
            "hive-localhost.sales",
            "hive-localhost.sales.orders",
            "hive-localhost.sales.payments",
            "hive-localhost.sales.recent_orders",
            "hive-localhost.sales.legacy",
        ]
    );
    assert!(!ids.iter().any(|id| id.contains("information_schema") || id.contains(".sys")));
}

#[test]
fn test_database_asset() {
    let (assets, _) = sync_warehouse();
    let database = find(&assets, "hive-localhost.sales");

    assert_eq!(database.info.asset_type, DATABASE_ASSET_TYPE);
    assert!(database.columns.is_empty());
    assert_eq!(database.property("host"), Some(&json!("localhost")));
    assert_eq!(database.property("port"), Some(&json!("10000")));
    assert_eq!(
        database.property("updatedAt"),
        Some(&json!(fixed_clock().to_string()))
    );
}

#[test]
fn test_example_table_columns_and_tree() {
    let (assets, _) = sync_warehouse();
    let table = find(&assets, "hive-localhost.default.hive_example");

    assert_eq!(table.info.asset_type, TABLE_ASSET_TYPE);
    assert_eq!(table.info.qualified_name, "default.hive_example");
    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    assert_eq!(
        table.property(DecodeOutcome::TREE_PROPERTY),
        Some(&Samples::expected_tree("hive-example-table"))
    );
    assert_eq!(table.property(DecodeOutcome::RAW_PROPERTY), None);
    assert_eq!(table.property("database"), Some(&json!("default")));
    assert_eq!(table.relationships[0].relationship_type, "parent");
    assert_eq!(table.relationships[0].asset_id, "hive-localhost.default");
}

#[test]
fn test_managed_table_tree() {
    let (assets, _) = sync_warehouse();
    let orders = find(&assets, "hive-localhost.sales.orders");

    assert_eq!(orders.columns[0].description, "primary key");
    assert_eq!(
        orders.property(DecodeOutcome::TREE_PROPERTY),
        Some(&Samples::expected_tree("managed-orc-table"))
    );
}

#[test]
fn test_undecodable_detail_is_kept_raw() {
    let (assets, _) = sync_warehouse();
    let payments = find(&assets, "hive-localhost.sales.payments");

    assert_eq!(payments.columns[0].data_type, "decimal(10,2)");
    assert_eq!(payments.property(DecodeOutcome::TREE_PROPERTY), None);
    let raw = payments
        .property(DecodeOutcome::RAW_PROPERTY)
        .and_then(Value::as_str)
        .unwrap();
    assert!(raw.starts_with("Table(tableName:payments"));
}

#[test]
fn test_describe_failure_uses_probe_columns() {
    let (assets, _) = sync_warehouse();
    let view = find(&assets, "hive-localhost.sales.recent_orders");

    let names: Vec<&str> = view.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["recent_orders.order_id", "recent_orders.amount"]);
    assert!(view.columns.iter().all(|c| c.description.is_empty()));
    assert_eq!(view.property(DecodeOutcome::TREE_PROPERTY), None);
    assert_eq!(view.property(DecodeOutcome::RAW_PROPERTY), None);
}

#[test]
fn test_failed_probe_still_publishes_table() {
    let (assets, _) = sync_warehouse();
    let legacy = find(&assets, "hive-localhost.sales.legacy");
    assert!(legacy.columns.is_empty());
}

#[test]
fn test_raw_mode_from_config() {
    let config = Loader::new()
        .set_override("assets.detailed_table_info", "raw")
        .unwrap()
        .set_override("assets.id_prefix", "prod")
        .unwrap()
        .build()
        .unwrap();
    let mut supplier =
        AssetsSupplier::new(&config, Samples::catalog("warehouse"), MemoryStateRepository::new());
    let mut assets: Vec<Asset> = Vec::new();
    supplier.fetch_assets(&mut assets).unwrap();

    let orders = find(&assets, "prod.sales.orders");
    assert_eq!(orders.property(DecodeOutcome::TREE_PROPERTY), None);
    assert_eq!(
        orders.property(DecodeOutcome::RAW_PROPERTY),
        Some(&Value::String(Samples::notation("managed-orc-table")))
    );
}

#[test]
fn test_watermark_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state").join("hive.json");
    let config = load_defaults().unwrap();

    let mut first = AssetsSupplier::new(
        &config,
        Samples::catalog("warehouse"),
        FileStateRepository::new(&state_path),
    )
    .with_clock(fixed_clock);
    first.fetch_assets(&mut Vec::<Asset>::new()).unwrap();

    let mut second = AssetsSupplier::new(
        &config,
        Samples::catalog("warehouse"),
        FileStateRepository::new(&state_path),
    );
    let report = second.fetch_assets(&mut Vec::<Asset>::new()).unwrap();
    assert_eq!(report.previous_watermark, fixed_clock());
    assert!(second.state().last_updated_at().unwrap() >= fixed_clock());
}

#[test]
fn test_json_lines_output() {
    let config = load_defaults().unwrap();
    let mut supplier =
        AssetsSupplier::new(&config, Samples::catalog("warehouse"), MemoryStateRepository::new());
    let mut sink = JsonLinesSink::new(Vec::<u8>::new());
    supplier.fetch_assets(&mut sink).unwrap();

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[1]["info"]["type"], json!("hive_table"));
    assert_eq!(lines[1]["properties"]["detailedTableInfo"]["tableName"], json!("hive_example"));
}
