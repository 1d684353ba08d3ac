//! CSV export of merged records
//!
//! The header row is taken from the keys of the first record in insertion
//! order (identity and modified flag first, then the record fields, then
//! any override-added extras). Values render like spreadsheet cells:
//! whole-number floats print as integers, nulls as empty.

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Serialize records to CSV at `path`. Empty input writes an empty file.
pub fn export_csv_file<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let mut wtr =
        Writer::from_path(path).with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_csv(records, &mut wtr)?;
    log::info!("CSV exported to {}", path.display());
    Ok(())
}

/// Write records as CSV rows into an open writer.
pub fn write_csv<T: Serialize, W: Write>(records: &[T], wtr: &mut Writer<W>) -> Result<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };

    let first = serde_json::to_value(first).context("Record is not serializable")?;
    let headers: Vec<String> = first
        .as_object()
        .context("Record did not serialize to an object")?
        .keys()
        .cloned()
        .collect();
    wtr.write_record(&headers).context("Failed to write CSV header")?;

    for record in records {
        let value = serde_json::to_value(record).context("Record is not serializable")?;
        let object = value
            .as_object()
            .context("Record did not serialize to an object")?;

        let row: Vec<String> = headers
            .iter()
            .map(|key| object.get(key).map(cell_display).unwrap_or_default())
            .collect();
        wtr.write_record(&row).context("Failed to write CSV row")?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

fn cell_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
