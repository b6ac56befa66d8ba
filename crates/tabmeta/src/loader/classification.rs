//! Classification.csv validator.

use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Bilingual, Classification};
use crate::reader::read_table;
use crate::report::Report;
use crate::schema::CLASSIFICATION;

use super::{extra_fields, missing_required, numeric_field};

pub(super) fn load(
    dir: &Path,
    report: &mut Report,
) -> Result<IndexMap<String, Classification>> {
    let file = CLASSIFICATION.filename;
    let mut classifications: IndexMap<String, Classification> = IndexMap::new();

    for row in read_table(dir, &CLASSIFICATION)? {
        if missing_required(&row, &CLASSIFICATION, report) {
            report.drop_record(file, row.row);
            continue;
        }

        let declared_category_count =
            numeric_field(&row, "Number_Of_Category_Items", file, report);

        let mnemonic = row.get("Classification_Mnemonic").to_string();
        if classifications.contains_key(&mnemonic) {
            report.defect(
                file,
                row.row,
                &format!("duplicate value {mnemonic} for Classification_Mnemonic"),
            );
            report.drop_record(file, row.row);
            continue;
        }

        let extra = extra_fields(
            &row,
            &CLASSIFICATION,
            &[
                "Classification_Mnemonic",
                "Variable_Mnemonic",
                "Classification_Label",
                "Classification_Label_Welsh",
                "Security_Mnemonic",
                "Number_Of_Category_Items",
            ],
        );

        classifications.insert(
            mnemonic.clone(),
            Classification {
                mnemonic,
                variable: row.get("Variable_Mnemonic").to_string(),
                label: Bilingual::new(
                    row.get("Classification_Label"),
                    row.get("Classification_Label_Welsh"),
                ),
                security: row.get("Security_Mnemonic").to_string(),
                declared_category_count,
                categories: Vec::new(),
                extra,
            },
        );
    }

    Ok(classifications)
}
