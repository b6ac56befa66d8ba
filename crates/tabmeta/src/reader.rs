//! Table reader: parses one CSV file into an ordered row sequence.
//!
//! The reader validates structure only (file present, header exact); cell
//! content is the validators' concern.

use std::fs::File;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{MetadataError, Result};
use crate::schema::TableSchema;

/// One data row, mapping column name to raw cell value.
///
/// `row` is the 1-indexed data row number used in diagnostics.
#[derive(Debug, Clone)]
pub struct Row {
    pub row: usize,
    values: IndexMap<String, String>,
}

impl Row {
    /// Trimmed cell value for a column; empty string when absent.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(|v| v.trim()).unwrap_or("")
    }

    /// Trimmed cell value, `None` when empty.
    pub fn get_optional(&self, column: &str) -> Option<String> {
        let value = self.get(column);
        (!value.is_empty()).then(|| value.to_string())
    }

    fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

/// Read a table, enforcing the versioned header.
///
/// Fails on a missing file, an unreadable record, or a header row that does
/// not exactly match `schema.columns`. Rows whose cells are all empty
/// (trailing blank lines) are skipped but still consume a row number.
pub fn read_table(dir: &Path, schema: &TableSchema) -> Result<Vec<Row>> {
    let path = dir.join(schema.filename);
    let file = File::open(&path).map_err(|e| MetadataError::Io {
        path: path.clone(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| MetadataError::Csv {
            file: schema.filename.to_string(),
            source: e,
        })?
        .clone();
    let found: Vec<&str> = headers.iter().map(|h| h.trim()).collect();
    if found.as_slice() != schema.columns {
        return Err(MetadataError::Header {
            file: schema.filename.to_string(),
            expected: schema.columns.join(", "),
            found: found.join(", "),
        });
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| MetadataError::Csv {
            file: schema.filename.to_string(),
            source: e,
        })?;
        let values: IndexMap<String, String> = schema
            .columns
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        let row = Row {
            row: idx + 1,
            values,
        };
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}
