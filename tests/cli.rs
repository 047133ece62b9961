use assert_cmd::cargo::cargo_bin_cmd;
use hivemeta::hive::testing::Samples;
use predicates::prelude::*;
use std::fs;

#[test]
fn decode_sample_file() {
    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.arg("decode")
        .arg(Samples::notation_path("managed-orc-table"))
        .arg("--compact");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"tableName":"orders","dbName":"sales""#))
        .stdout(predicate::str::contains(r#""bucketCols":["order_id"]"#));
}

#[test]
fn decode_from_stdin() {
    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.arg("decode")
        .arg("--compact")
        .write_stdin("SimpleObject(name:test, value:123, active:true)");

    cmd.assert()
        .success()
        .stdout("{\"name\":\"test\",\"value\":123,\"active\":true}\n");
}

#[test]
fn log_level_flag_routes_logs_to_stderr() {
    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.env_remove("RUST_LOG")
        .args(["--log-level", "debug", "decode", "--compact"])
        .write_stdin("T(a:1)");

    cmd.assert()
        .success()
        .stdout("{\"a\":1}\n")
        .stderr(predicate::str::contains("decoded detailed table information"));
}

#[test]
fn decode_falls_back_to_raw_data() {
    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.arg("decode")
        .arg("--compact")
        .write_stdin("Table(type:decimal(10,2))");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"{"rawData":"Table(type:decimal(10,2))"}"#));
}

#[test]
fn decode_ignore_mode_prints_nothing() {
    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.args(["decode", "--mode", "ignore"]).write_stdin("Table(a:1)");

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn decode_rejects_unknown_mode() {
    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.args(["decode", "--mode", "verbose"]).write_stdin("Table(a:1)");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown detailed table info mode"));
}

#[test]
fn sync_once_prints_one_line_per_asset() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");

    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.arg("sync")
        .arg("--catalog")
        .arg(Samples::catalog_path("warehouse"))
        .arg("--state")
        .arg(&state)
        .arg("--once");

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.lines().count(), 7);
    assert!(stdout.contains(r#""id":"hive-localhost.sales.orders""#));

    let saved = fs::read_to_string(&state).unwrap();
    assert!(saved.contains("lastUpdatedAt"));
}

#[test]
fn sync_honours_disabled_flag() {
    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.env("HIVEMETA_ASSETS__ENABLED", "false")
        .arg("sync")
        .arg("--catalog")
        .arg(Samples::catalog_path("warehouse"))
        .arg("--once");

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn sync_reports_missing_catalog() {
    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.args(["sync", "--catalog", "does/not/exist.yaml", "--once"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot read catalog fixture"));
}

#[test]
fn show_config_layers_file_and_hides_password() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hivemeta.toml");
    fs::write(
        &path,
        "[connection]\nhost = \"metastore.internal\"\npassword = \"secret\"\n\n[assets]\npoll_interval = \"30s\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("hivemeta");
    cmd.arg("show-config").arg("--config").arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""host": "metastore.internal""#))
        .stdout(predicate::str::contains(r#""poll_interval": "30s""#))
        .stdout(predicate::str::contains("secret").not());
}
