// src/export.rs
use std::fs;
use std::path::Path;

use crate::error::ScrapeError;
use crate::table::Table;

/// Write a table as CSV: one header row, no index column, quoting only where
/// a field is ambiguous (the writer's default). Parent directories are
/// created as needed. Absent cells serialize as empty fields.
pub fn save_table(table: &Table, path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}
