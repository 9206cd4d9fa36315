//! Output formatting and persistence for classified readings.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::reading::{ClassifiedReading, ReadingRow};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs any value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a serializable value to `path` as pretty-printed JSON, replacing
/// any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    debug!(path, "Wrote JSON");
    Ok(())
}

/// Appends classified readings as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records(path: &str, readings: &[ClassifiedReading]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = readings.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for reading in readings {
        writer.serialize(ReadingRow::from(reading))?;
    }
    writer.flush()?;

    Ok(())
}
