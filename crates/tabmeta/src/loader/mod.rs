//! Loading engine: drives the per-table validators in dependency order.
//!
//! Tables are processed as Classification → Category → Database →
//! Database_Variable → Dataset_Variable → Dataset. Dataset_Variable.csv is
//! read before Dataset.csv even though it references dataset mnemonics: those
//! are forward references by design, and the dataset-level checks need the
//! per-dataset variable groups to already exist.

mod category;
mod classification;
mod database;
mod dataset;
mod resolve;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::error::Result;
use crate::model::{Category, Classification, Database, Dataset, Variable};
use crate::reader::Row;
use crate::report::{Mode, Report};
use crate::schema::TableSchema;

/// The validated, cross-referenced metadata graph.
///
/// All maps are keyed by mnemonic and iterate in file order.
#[derive(Debug)]
pub struct Metadata {
    pub classifications: IndexMap<String, Classification>,
    /// Categories grouped by classification mnemonic, in file order.
    pub categories: IndexMap<String, Vec<Category>>,
    pub databases: IndexMap<String, Database>,
    pub datasets: IndexMap<String, Dataset>,
    pub variables: IndexMap<String, Variable>,
    pub report: Report,
}

/// Orchestrates readers and validators for one input directory.
pub struct Loader {
    input_dir: PathBuf,
    mode: Mode,
}

impl Loader {
    pub fn new(input_dir: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            input_dir: input_dir.into(),
            mode,
        }
    }

    /// Load and validate the whole table set.
    ///
    /// Fails only on structural errors (missing file, bad header). Data-level
    /// defects are recorded on the returned report; the caller decides what a
    /// non-zero count means for the run.
    pub fn load(&self) -> Result<Metadata> {
        let dir = self.input_dir.as_path();
        let mut report = Report::new(self.mode);

        let mut classifications = classification::load(dir, &mut report)?;
        debug!("loaded {} classifications", classifications.len());

        let categories = category::load(dir, &mut classifications, &mut report)?;

        let (mut databases, variables) = database::load(dir, &mut report)?;
        debug!(
            "loaded {} databases with {} distinct variables",
            databases.len(),
            variables.len()
        );
        resolve::check_lowest_geog_databases(&mut databases, &mut report);

        let mut groups =
            dataset::load_variable_groups(dir, &variables, &classifications, &mut report)?;
        resolve::check_processing_priorities(&groups, &mut report);

        let datasets = dataset::load(dir, &databases, &mut groups, &mut report)?;
        dataset::report_orphan_groups(&groups, &mut report);
        debug!("loaded {} datasets", datasets.len());

        report.finish();

        Ok(Metadata {
            classifications,
            categories,
            databases,
            datasets,
            variables,
            report,
        })
    }
}

/// Required-field check; reports the first missing field and tells the
/// caller to drop the record.
fn missing_required(row: &Row, schema: &TableSchema, report: &mut Report) -> bool {
    for field in schema.required {
        if row.get(field).is_empty() {
            report.defect(
                schema.filename,
                row.row,
                &format!("no value supplied for required field {field}"),
            );
            return true;
        }
    }
    false
}

/// Optional numeric field; an unparseable value is reported and treated as
/// absent rather than dropping the record.
fn numeric_field(row: &Row, field: &str, file: &str, report: &mut Report) -> Option<u32> {
    let value = row.get(field);
    if value.is_empty() {
        return None;
    }
    match value.parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            report.defect(file, row.row, &format!("invalid value {value} for {field}"));
            None
        }
    }
}

/// Y/N flag field; an invalid value is reported and treated as N.
fn flag_field(row: &Row, field: &str, file: &str, report: &mut Report) -> bool {
    match row.get(field) {
        "Y" => true,
        "" | "N" => false,
        other => {
            report.defect(file, row.row, &format!("invalid value {other} for {field}"));
            false
        }
    }
}

/// Declared columns the validator did not consume, carried through for
/// projection. Empty cells are omitted.
fn extra_fields(
    row: &Row,
    schema: &TableSchema,
    consumed: &[&str],
) -> IndexMap<String, String> {
    schema
        .columns
        .iter()
        .filter(|column| !consumed.contains(column))
        .filter_map(|column| {
            let value = row.get(column);
            (!value.is_empty()).then(|| (column.to_string(), value.to_string()))
        })
        .collect()
}
