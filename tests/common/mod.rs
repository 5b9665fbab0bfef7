#![allow(dead_code)]

use serde_json::{Value, json};
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes the given commands as a JSON Lines batch file.
pub fn batch_file(commands: &[Value]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for command in commands {
        writeln!(file, "{}", command).unwrap();
    }
    file
}

/// Writes `rows` create commands spread over a few mobile-money channels.
pub fn generate_batch(path: &Path, rows: usize) -> Result<(), Error> {
    let channels = ["mpesa", "airtel-money", "mtn-mobile-money", "tigo-cash"];
    let mut file = File::create(path)?;
    for i in 0..rows {
        let command = json!({
            "op": "create",
            "channel": channels[i % channels.len()],
            "request": {
                "user_id": format!("user-{}", i % 50),
                "amount": format!("{}.{:02}", i, i % 100),
                "currency": "KES",
                "status": "pending"
            }
        });
        writeln!(file, "{}", command)?;
    }
    file.flush()
}

/// Parses stdout of the binary into one JSON value per line.
pub fn responses(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
        .collect()
}
