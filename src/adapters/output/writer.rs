//! CSV table writer
//!
//! Writes one [`Table`] to `<data_path>/<file>`. The table is written to a
//! sibling `.tmp` file first and renamed over the destination, so the
//! previous output survives any failure mid-write.

use crate::domain::{IiqError, Result, Table};
use csv::WriterBuilder;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes tables into one output directory
#[derive(Debug, Clone)]
pub struct CsvTableWriter {
    data_path: PathBuf,
}

impl CsvTableWriter {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Destination file for a table
    pub fn destination(&self, table: &Table) -> PathBuf {
        self.data_path.join(table.kind().file_name())
    }

    /// Write the table, fully replacing any previous file
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written or renamed.
    pub fn write(&self, table: &Table) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_path).map_err(|e| {
            IiqError::Io(format!(
                "Failed to create data directory {}: {}",
                self.data_path.display(),
                e
            ))
        })?;

        let destination = self.destination(table);
        let staging = destination.with_extension("csv.tmp");

        let result = write_table(&staging, table);
        if let Err(e) = result {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }

        fs::rename(&staging, &destination).map_err(|e| {
            IiqError::Io(format!(
                "Failed to move {} to {}: {}",
                staging.display(),
                destination.display(),
                e
            ))
        })?;

        tracing::info!(
            entity = %table.kind(),
            rows = table.len(),
            path = %destination.display(),
            "Table written"
        );

        Ok(destination)
    }
}

fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.values().iter().map(format_cell))?;
    }
    writer.flush()?;

    Ok(())
}

/// Render one value as a CSV cell
///
/// `null` is an empty cell, booleans are `True` / `False`, nested values
/// are compact JSON.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    }
}
