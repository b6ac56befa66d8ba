//! Cross-table resolver: set-level checks that need a whole table loaded.
//!
//! All passes iterate in file order so that tie-breaks ("first flagged
//! wins") and message order are deterministic.

use indexmap::IndexMap;

use crate::model::{Category, Classification, Database};
use crate::report::Report;
use crate::schema::{CATEGORY, DATABASE_VARIABLE, DATASET_VARIABLE};

use super::dataset::VariableGroup;

/// Attach resolved categories to their classifications and reconcile the
/// declared category counts. A mismatch is reported but the resolved list is
/// used as-is.
pub(super) fn reconcile_categories(
    classifications: &mut IndexMap<String, Classification>,
    categories: &IndexMap<String, Vec<Category>>,
    report: &mut Report,
) {
    for (mnemonic, classification) in classifications.iter_mut() {
        let resolved = categories.get(mnemonic).cloned().unwrap_or_default();
        if let Some(declared) = classification.declared_category_count {
            let found = resolved.len();
            if declared as usize != found {
                report.table_defect(
                    CATEGORY.filename,
                    &format!(
                        "Unexpected number of categories for {mnemonic}: \
                         expected {declared} but found {found}"
                    ),
                );
            }
        }
        classification.categories = resolved;
    }
}

/// At most one lowest-geography flag per database. The first flagged
/// membership in file order wins; later flags are reported and cleared.
pub(super) fn check_lowest_geog_databases(
    databases: &mut IndexMap<String, Database>,
    report: &mut Report,
) {
    for (mnemonic, database) in databases.iter_mut() {
        let mut first: Option<String> = None;
        for membership in database.variables.iter_mut() {
            if !membership.lowest_geog {
                continue;
            }
            match &first {
                None => first = Some(membership.variable.clone()),
                Some(winner) => {
                    report.table_defect(
                        DATABASE_VARIABLE.filename,
                        &format!(
                            "Lowest_Geog_Variable_Flag set on {} and {winner} \
                             for database {mnemonic}",
                            membership.variable
                        ),
                    );
                    membership.lowest_geog = false;
                }
            }
        }
    }
}

/// Processing priorities of a dataset's classification entries must form the
/// contiguous set 1..=n with no duplicates. A missing priority counts as 0;
/// an invalid set is reported as a whole, in file order.
pub(super) fn check_processing_priorities(
    groups: &IndexMap<String, VariableGroup>,
    report: &mut Report,
) {
    for (mnemonic, group) in groups {
        let priorities: Vec<u32> = group
            .entries
            .iter()
            .filter(|entry| entry.classification.is_some())
            .map(|entry| entry.priority.unwrap_or(0))
            .collect();
        if priorities.is_empty() {
            continue;
        }

        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        let contiguous = sorted
            .iter()
            .enumerate()
            .all(|(index, &priority)| priority == index as u32 + 1);
        if !contiguous {
            report.table_defect(
                DATASET_VARIABLE.filename,
                &format!("Invalid processing_priorities {priorities:?} for dataset {mnemonic}"),
            );
        }
    }
}
