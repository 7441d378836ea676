#![cfg(feature = "storage-rocksdb")]

mod common;

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

fn run(db_path: &std::path::Path, args: &[&str]) -> String {
    let output = Command::new(cargo_bin!("autopay"))
        .arg("--db-path")
        .arg(db_path)
        .args(["--today", "2025-01-10", "--processing-delay-ms", "0"])
        .args(args)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: seed the bill list
    let seeded = run(&db_path, &["seed"]);
    assert!(seeded.contains("Seeded 8 bills"));

    // 2. Second run: configure AutoPay for the electric bill
    let script = common::script(&["date,2025-02-01", "frequency,monthly", "limit,100", "save,"]);
    let configured = run(
        &db_path,
        &["configure", script.path().to_str().unwrap(), "--bill-id", "1"],
    );
    assert!(configured.contains("AutoPay successfully configured for Electric Company"));

    // 3. Later runs see both the record and the patched bill list
    let shown = run(&db_path, &["show", "1"]);
    assert!(shown.contains("\"frequency\": \"monthly\""));
    assert!(shown.contains("\"isActive\": true"));

    let bills = run(&db_path, &["bills", "--filter", "autopay"]);
    assert!(bills.contains("1,Electric Company,125.50,2025-01-15,AutoPay Enabled"));
}
