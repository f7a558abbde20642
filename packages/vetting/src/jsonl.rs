//! JSON Lines file helpers.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde_json::json;
use tracing::warn;

use crate::error::Result;
use crate::record::Record;

/// Read a JSONL file into records, capped by `limit` when provided.
///
/// Lines that fail to parse are skipped with a warning; a bad line never
/// aborts the batch. Blank lines are ignored.
pub fn read_jsonl(path: &Path, limit: Option<usize>) -> Result<Vec<Record>> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        if limit.is_some_and(|limit| records.len() >= limit) {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Record>(trimmed) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(line = index + 1, %error, "Skipping invalid JSON line");
            }
        }
    }

    Ok(records)
}

/// Write records to a JSONL file, creating parent directories as needed.
pub fn write_jsonl(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = fs::File::create(path)?;
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
    }
    Ok(())
}

/// Create a one-record sample input for test runs (overwrites existing
/// content).
pub fn ensure_sample_input(path: &Path) -> Result<()> {
    let sample: Record = serde_json::from_value(json!({
        "Title": "SAP SuccessFactors Recruitment",
        "Description": "SAP SuccessFactors Recruitment: assess whether the solution provides \
data export capability in different formats (e.g., CSV, Excel, PDF) for hiring managers, HR \
business partners, and recruitment super users for all recruitment data stored and created.",
        "Area": [],
        "Product": [],
    }))?;
    write_jsonl(path, &[sample])
}
