//! Database.csv and Database_Variable.csv validators.
//!
//! Database_Variable.csv is also where shared variables are registered: a
//! variable's kind (geographic or categorical) comes from its type code, and
//! the first-seen kind wins when later rows disagree.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Bilingual, Database, DatabaseVariable, Variable, VariableKind};
use crate::reader::read_table;
use crate::report::Report;
use crate::schema::{DATABASE, DATABASE_VARIABLE};

use super::{extra_fields, flag_field, missing_required};

pub(super) fn load(
    dir: &Path,
    report: &mut Report,
) -> Result<(IndexMap<String, Database>, IndexMap<String, Variable>)> {
    let mut databases = load_databases(dir, report)?;
    let variables = load_database_variables(dir, &mut databases, report)?;
    Ok((databases, variables))
}

fn load_databases(dir: &Path, report: &mut Report) -> Result<IndexMap<String, Database>> {
    let file = DATABASE.filename;
    let mut databases: IndexMap<String, Database> = IndexMap::new();

    for row in read_table(dir, &DATABASE)? {
        if missing_required(&row, &DATABASE, report) {
            report.drop_record(file, row.row);
            continue;
        }

        let mnemonic = row.get("Database_Mnemonic").to_string();
        if databases.contains_key(&mnemonic) {
            report.defect(
                file,
                row.row,
                &format!("duplicate value {mnemonic} for Database_Mnemonic"),
            );
            report.drop_record(file, row.row);
            continue;
        }

        let extra = extra_fields(
            &row,
            &DATABASE,
            &[
                "Database_Mnemonic",
                "Database_Title",
                "Database_Title_Welsh",
                "Database_Description",
                "Database_Description_Welsh",
            ],
        );

        databases.insert(
            mnemonic.clone(),
            Database {
                mnemonic,
                title: Bilingual::new(row.get("Database_Title"), row.get("Database_Title_Welsh")),
                description: Bilingual::new(
                    row.get("Database_Description"),
                    row.get("Database_Description_Welsh"),
                ),
                variables: Vec::new(),
                extra,
            },
        );
    }

    Ok(databases)
}

fn load_database_variables(
    dir: &Path,
    databases: &mut IndexMap<String, Database>,
    report: &mut Report,
) -> Result<IndexMap<String, Variable>> {
    let file = DATABASE_VARIABLE.filename;
    let mut variables: IndexMap<String, Variable> = IndexMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for row in read_table(dir, &DATABASE_VARIABLE)? {
        if missing_required(&row, &DATABASE_VARIABLE, report) {
            report.drop_record(file, row.row);
            continue;
        }

        let database_mnemonic = row.get("Database_Mnemonic").to_string();
        let variable_mnemonic = row.get("Variable_Mnemonic").to_string();

        let type_code = row.get("Variable_Type_Code");
        let kind = match type_code {
            "GEOG" => VariableKind::Geographic,
            "CLASS" => VariableKind::Categorical,
            other => {
                report.defect(
                    file,
                    row.row,
                    &format!("invalid value {other} for Variable_Type_Code"),
                );
                VariableKind::Categorical
            }
        };
        let lowest_geog = flag_field(&row, "Lowest_Geog_Variable_Flag", file, report);

        if !seen.insert((database_mnemonic.clone(), variable_mnemonic.clone())) {
            report.defect(
                file,
                row.row,
                &format!(
                    "duplicate value combo {database_mnemonic}/{variable_mnemonic} \
                     for Database_Mnemonic/Variable_Mnemonic"
                ),
            );
            report.drop_record(file, row.row);
            continue;
        }

        let Some(database) = databases.get_mut(&database_mnemonic) else {
            report.defect(
                file,
                row.row,
                &format!("invalid value {database_mnemonic} for Database_Mnemonic"),
            );
            report.drop_record(file, row.row);
            continue;
        };

        match variables.get(&variable_mnemonic) {
            None => {
                variables.insert(
                    variable_mnemonic.clone(),
                    Variable {
                        mnemonic: variable_mnemonic.clone(),
                        kind,
                    },
                );
            }
            Some(existing) if existing.kind != kind => {
                report.defect(
                    file,
                    row.row,
                    &format!(
                        "conflicting Variable_Type_Code {type_code} \
                         for variable {variable_mnemonic}"
                    ),
                );
            }
            Some(_) => {}
        }

        database.variables.push(DatabaseVariable {
            variable: variable_mnemonic,
            lowest_geog,
        });
    }

    Ok(variables)
}
