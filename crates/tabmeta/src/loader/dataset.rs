//! Dataset_Variable.csv and Dataset.csv validators.
//!
//! Dataset_Variable.csv is processed first. Its rows are grouped per dataset
//! mnemonic (a forward reference), each row validated against the variable
//! and classification tables. Dataset.csv then claims its group and applies
//! the database-membership checks.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Bilingual, Classification, Database, Dataset, DatasetVariable, Variable};
use crate::reader::read_table;
use crate::report::Report;
use crate::schema::{DATASET, DATASET_VARIABLE};

use super::{extra_fields, flag_field, missing_required, numeric_field};

/// Validated Dataset_Variable.csv rows for one dataset mnemonic.
#[derive(Debug)]
pub(super) struct VariableGroup {
    pub entries: Vec<DatasetVariable>,
    /// Set when a Dataset.csv record references this group, even if that
    /// record is later dropped.
    pub claimed: bool,
}

pub(super) fn load_variable_groups(
    dir: &Path,
    variables: &IndexMap<String, Variable>,
    classifications: &IndexMap<String, Classification>,
    report: &mut Report,
) -> Result<IndexMap<String, VariableGroup>> {
    let file = DATASET_VARIABLE.filename;
    let mut groups: IndexMap<String, VariableGroup> = IndexMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    // First lowest-geography variable flagged per dataset; later flags lose.
    let mut first_flag: HashMap<String, String> = HashMap::new();

    for row in read_table(dir, &DATASET_VARIABLE)? {
        if missing_required(&row, &DATASET_VARIABLE, report) {
            report.drop_record(file, row.row);
            continue;
        }

        let dataset = row.get("Dataset_Mnemonic").to_string();
        let variable_mnemonic = row.get("Variable_Mnemonic").to_string();
        let priority = numeric_field(&row, "Processing_Priority", file, report);
        let flagged = flag_field(&row, "Lowest_Geog_Variable_Flag", file, report);
        let classification = row.get_optional("Classification_Mnemonic");

        if !seen.insert((dataset.clone(), variable_mnemonic.clone())) {
            report.defect(
                file,
                row.row,
                &format!(
                    "duplicate value combo {dataset}/{variable_mnemonic} \
                     for Dataset_Mnemonic/Variable_Mnemonic"
                ),
            );
            report.drop_record(file, row.row);
            continue;
        }

        let Some(variable) = variables.get(&variable_mnemonic) else {
            report.defect(
                file,
                row.row,
                &format!("invalid value {variable_mnemonic} for Variable_Mnemonic"),
            );
            report.drop_record(file, row.row);
            continue;
        };

        let mut entry = DatasetVariable {
            variable: variable_mnemonic.clone(),
            classification,
            priority,
            lowest_geog: false,
        };

        if variable.is_geographic() {
            if entry.classification.take().is_some() {
                report.defect(
                    file,
                    row.row,
                    &format!(
                        "Classification_Mnemonic must not be specified for \
                         geographic variable {variable_mnemonic} in dataset {dataset}"
                    ),
                );
            }
            if entry.priority.take().is_some() {
                report.defect(
                    file,
                    row.row,
                    &format!(
                        "Processing_Priority must not be specified for \
                         geographic variable {variable_mnemonic} in dataset {dataset}"
                    ),
                );
            }
            if flagged {
                match first_flag.get(&dataset) {
                    None => {
                        first_flag.insert(dataset.clone(), variable_mnemonic.clone());
                        entry.lowest_geog = true;
                    }
                    Some(first) => {
                        report.defect(
                            file,
                            row.row,
                            &format!(
                                "Lowest_Geog_Variable_Flag set on variable \
                                 {variable_mnemonic} and {first} for dataset {dataset}"
                            ),
                        );
                    }
                }
            }
        } else {
            if flagged {
                report.defect(
                    file,
                    row.row,
                    &format!(
                        "Lowest_Geog_Variable_Flag set on non-geographic \
                         variable {variable_mnemonic} for dataset {dataset}"
                    ),
                );
            }
            let Some(classification_mnemonic) = entry.classification.clone() else {
                report.defect(
                    file,
                    row.row,
                    &format!(
                        "Classification must be specified for non-geographic \
                         {variable_mnemonic} in dataset {dataset}"
                    ),
                );
                report.drop_record(file, row.row);
                continue;
            };
            let belongs = classifications
                .get(&classification_mnemonic)
                .is_some_and(|c| c.variable == variable_mnemonic);
            if !belongs {
                report.defect(
                    file,
                    row.row,
                    &format!(
                        "Invalid classification {classification_mnemonic} specified \
                         for variable {variable_mnemonic} in dataset {dataset}"
                    ),
                );
                report.drop_record(file, row.row);
                continue;
            }
            if entry.priority.is_none() {
                report.defect(
                    file,
                    row.row,
                    &format!(
                        "Processing_Priority not specified for classification \
                         {classification_mnemonic} in dataset {dataset}"
                    ),
                );
            }
        }

        groups
            .entry(dataset)
            .or_insert_with(|| VariableGroup {
                entries: Vec::new(),
                claimed: false,
            })
            .entries
            .push(entry);
    }

    Ok(groups)
}

pub(super) fn load(
    dir: &Path,
    databases: &IndexMap<String, Database>,
    groups: &mut IndexMap<String, VariableGroup>,
    report: &mut Report,
) -> Result<IndexMap<String, Dataset>> {
    let file = DATASET.filename;
    let mut datasets: IndexMap<String, Dataset> = IndexMap::new();

    for row in read_table(dir, &DATASET)? {
        if missing_required(&row, &DATASET, report) {
            report.drop_record(file, row.row);
            continue;
        }

        let mnemonic = row.get("Dataset_Mnemonic").to_string();
        if datasets.contains_key(&mnemonic) {
            report.defect(
                file,
                row.row,
                &format!("duplicate value {mnemonic} for Dataset_Mnemonic"),
            );
            report.drop_record(file, row.row);
            continue;
        }

        let database_mnemonic = row.get("Database_Mnemonic").to_string();
        let Some(database) = databases.get(&database_mnemonic) else {
            report.defect(
                file,
                row.row,
                &format!("invalid value {database_mnemonic} for Database_Mnemonic"),
            );
            report.drop_record(file, row.row);
            continue;
        };

        let entries = match groups.get_mut(&mnemonic) {
            Some(group) => {
                group.claimed = true;
                group.entries.clone()
            }
            None => Vec::new(),
        };
        if entries.is_empty() {
            report.defect(
                file,
                row.row,
                &format!("{mnemonic} has no associated classifications or geographic variable"),
            );
            report.drop_record(file, row.row);
            continue;
        }

        // Entries may only use variables of the owning database; the first
        // violation drops the dataset.
        let violation = entries
            .iter()
            .find(|entry| !database.contains_variable(&entry.variable));
        if let Some(entry) = violation {
            let message = match &entry.classification {
                Some(classification) => format!(
                    "{mnemonic} has classification {classification} \
                     that is not in database {database_mnemonic}"
                ),
                None => format!(
                    "{mnemonic} has geographic variable {} \
                     that is not in database {database_mnemonic}",
                    entry.variable
                ),
            };
            report.defect(file, row.row, &message);
            report.drop_record(file, row.row);
            continue;
        }

        let extra = extra_fields(
            &row,
            &DATASET,
            &[
                "Dataset_Mnemonic",
                "Dataset_Title",
                "Dataset_Title_Welsh",
                "Dataset_Description",
                "Dataset_Description_Welsh",
                "Database_Mnemonic",
                "Security_Mnemonic",
            ],
        );

        datasets.insert(
            mnemonic.clone(),
            Dataset {
                mnemonic,
                title: Bilingual::new(row.get("Dataset_Title"), row.get("Dataset_Title_Welsh")),
                description: Bilingual::new(
                    row.get("Dataset_Description"),
                    row.get("Dataset_Description_Welsh"),
                ),
                database: database_mnemonic,
                security: row.get("Security_Mnemonic").to_string(),
                variables: entries,
                extra,
            },
        );
    }

    Ok(datasets)
}

/// Groups never claimed by any Dataset.csv record.
pub(super) fn report_orphan_groups(
    groups: &IndexMap<String, VariableGroup>,
    report: &mut Report,
) {
    for (mnemonic, group) in groups {
        if !group.claimed {
            report.table_defect(
                DATASET_VARIABLE.filename,
                &format!("no Dataset.csv record for dataset {mnemonic}"),
            );
        }
    }
}
