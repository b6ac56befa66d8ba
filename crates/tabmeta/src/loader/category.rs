//! Category.csv validator.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::model::{Bilingual, Category, Classification};
use crate::reader::read_table;
use crate::report::Report;
use crate::schema::CATEGORY;

use super::{missing_required, resolve};

pub(super) fn load(
    dir: &Path,
    classifications: &mut IndexMap<String, Classification>,
    report: &mut Report,
) -> Result<IndexMap<String, Vec<Category>>> {
    let file = CATEGORY.filename;
    let mut categories: IndexMap<String, Vec<Category>> = IndexMap::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for row in read_table(dir, &CATEGORY)? {
        if missing_required(&row, &CATEGORY, report) {
            report.drop_record(file, row.row);
            continue;
        }

        let code = row.get("Category_Code").to_string();
        let classification = row.get("Classification_Mnemonic").to_string();

        if !seen.insert((classification.clone(), code.clone())) {
            report.defect(
                file,
                row.row,
                &format!(
                    "duplicate value combo {classification}/{code} \
                     for Classification_Mnemonic/Category_Code"
                ),
            );
            report.drop_record(file, row.row);
            continue;
        }

        if !classifications.contains_key(&classification) {
            report.defect(
                file,
                row.row,
                &format!("invalid value {classification} for Classification_Mnemonic"),
            );
            report.drop_record(file, row.row);
            continue;
        }

        categories.entry(classification.clone()).or_default().push(Category {
            classification,
            code,
            label: Bilingual::new(row.get("Category_Label"), row.get("Category_Label_Welsh")),
        });
    }

    resolve::reconcile_categories(classifications, &categories, report);

    Ok(categories)
}
