#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use serde_json::json;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: create a payment
    let batch1 = common::batch_file(&[json!({"op": "create", "channel": "bank-transfer",
        "request": {"account_name": "Kofi", "account_number": "0123456789", "bank_name": "GCB",
                    "amount": "100.0", "currency": "GHS", "status": "pending"}})]);

    let output1 = Command::new(cargo_bin!("payment-records"))
        .arg(batch1.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());
    let created = common::responses(&output1.stdout);
    let id = created[0]["transfer_id"].as_str().unwrap().to_string();

    // 2. Second run: the record is still there and can be updated
    let batch2 = common::batch_file(&[
        json!({"op": "update", "channel": "bank-transfer", "id": id, "request": {"status": "confirmed"}}),
        json!({"op": "get", "channel": "bank-transfer", "id": id}),
    ]);

    let output2 = Command::new(cargo_bin!("payment-records"))
        .arg(batch2.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());

    let responses = common::responses(&output2.stdout);
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[1]["transfer_id"], id.as_str());
    assert_eq!(responses[1]["status"], "confirmed");
    assert_eq!(responses[1]["timestamp"], created[0]["timestamp"]);
}
