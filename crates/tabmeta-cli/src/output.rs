//! Output document naming and writing.
//!
//! Filenames encode the tool version, the metadata master version, the
//! document type and a date/run-sequence stamp, so that consecutive runs
//! against evolving source tables never overwrite each other.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;

/// Name of the downstream cataloguing system, used as the filename prefix.
const SYSTEM: &str = "catalogue";

/// Tool version encoded in output filenames.
pub const TOOL_VERSION: &str = "v1-0-0";

/// Document types produced by one run.
pub const DATASET_DOC: &str = "dataset";
pub const SERVICE_DOC: &str = "service";

pub fn output_filename(metadata_version: &str, doc: &str, date: NaiveDate, build: u32) -> String {
    format!(
        "{SYSTEM}_{TOOL_VERSION}_{metadata_version}_{doc}-md_{}-{build}.json",
        date.format("%Y%m%d")
    )
}

pub fn write_document(
    dir: &Path,
    filename: &str,
    document: &Value,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(filename);
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)?;
    std::io::Write::flush(&mut writer)?;
    Ok(path)
}
