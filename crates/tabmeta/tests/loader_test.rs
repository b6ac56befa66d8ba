//! Integration tests for the loading and validation engine.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use tabmeta::{dataset_metadata, service_metadata, Loader, Mode, Severity};

const CLASSIFICATION_HEADER: &str = "Classification_Mnemonic,Variable_Mnemonic,\
Classification_Label,Classification_Label_Welsh,Security_Mnemonic,\
Number_Of_Category_Items,Version";
const CATEGORY_HEADER: &str =
    "Category_Code,Classification_Mnemonic,Category_Label,Category_Label_Welsh";
const DATABASE_HEADER: &str = "Database_Mnemonic,Database_Title,Database_Title_Welsh,\
Database_Description,Database_Description_Welsh,Version";
const DATABASE_VARIABLE_HEADER: &str =
    "Database_Mnemonic,Variable_Mnemonic,Variable_Type_Code,Lowest_Geog_Variable_Flag";
const DATASET_HEADER: &str = "Dataset_Mnemonic,Dataset_Title,Dataset_Title_Welsh,\
Dataset_Description,Dataset_Description_Welsh,Database_Mnemonic,Security_Mnemonic,Version";
const DATASET_VARIABLE_HEADER: &str = "Dataset_Mnemonic,Variable_Mnemonic,\
Classification_Mnemonic,Processing_Priority,Lowest_Geog_Variable_Flag";

fn write_file(dir: &Path, name: &str, header: &str, rows: &[&str]) {
    let mut content = String::from(header);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(dir.join(name), content).unwrap();
}

/// A small input set with no defects.
fn write_clean_input(dir: &Path) {
    write_file(
        dir,
        "Classification.csv",
        CLASSIFICATION_HEADER,
        &[
            "CLASS1,VAR1,Classification 1,Dosbarthiad 1,PUB,2,1",
            "CLASS2,VAR2,Classification 2,,CLOSED,,1",
        ],
    );
    write_file(
        dir,
        "Category.csv",
        CATEGORY_HEADER,
        &["CD1,CLASS1,Category 1,Categori 1", "CD2,CLASS1,Category 2,"],
    );
    write_file(
        dir,
        "Database.csv",
        DATABASE_HEADER,
        &["DB1,Database 1,Cronfa 1,Database 1 description,,1"],
    );
    write_file(
        dir,
        "Database_Variable.csv",
        DATABASE_VARIABLE_HEADER,
        &["DB1,VAR1,CLASS,", "DB1,VAR2,CLASS,", "DB1,GEO1,GEOG,Y"],
    );
    write_file(
        dir,
        "Dataset.csv",
        DATASET_HEADER,
        &["DS1,Dataset 1,Set 1,Dataset 1 description,,DB1,PUB,1"],
    );
    write_file(
        dir,
        "Dataset_Variable.csv",
        DATASET_VARIABLE_HEADER,
        &["DS1,VAR1,CLASS1,1,", "DS1,GEO1,,,Y"],
    );
}

/// Input exercising the whole recoverable-defect battery. Expected warnings
/// are asserted in order below.
fn write_defect_input(dir: &Path) {
    write_file(
        dir,
        "Classification.csv",
        CLASSIFICATION_HEADER,
        &[
            "CLASS1,VAR1,Classification 1,,PUB,4,1",
            "CLASS2,VAR2,Classification 2,,PUB,,1",
            "CLASSX,,Classification X,,PUB,,1",
            "CLASS1,VAR1,Classification 1,,PUB,,1",
            "CLASS5,VAR5,Classification 5,,PUB,x,1",
            "CLASS3,VAR3,Classification 3,,PUB,,1",
        ],
    );
    write_file(dir, "Category.csv", CATEGORY_HEADER, &["CD1,CLASS1,Category 1,"]);
    write_file(
        dir,
        "Database.csv",
        DATABASE_HEADER,
        &[
            "DB1,Database 1,,Database 1 description,,1",
            "DB2,Database 2,,Database 2 description,,1",
        ],
    );
    write_file(
        dir,
        "Database_Variable.csv",
        DATABASE_VARIABLE_HEADER,
        &[
            "DB1,VAR1,CLASS,",
            "DB1,VAR2,CLASS,",
            "DB1,GEO1,GEOG,Y",
            "DB1,GEO2,GEOG,",
            "DB1,GEO3,GEOG,Y",
            "DB2,VAR3,CLASS,",
        ],
    );
    write_file(
        dir,
        "Dataset.csv",
        DATASET_HEADER,
        &[
            "DS1,Dataset 1,,Dataset 1 description,,DB1,PUB,1",
            "DS2,Dataset 2,,Dataset 2 description,,DB1,PUB,1",
            "DS3,Dataset 3,,Dataset 3 description,,DB1,PUB,1",
        ],
    );
    write_file(
        dir,
        "Dataset_Variable.csv",
        DATASET_VARIABLE_HEADER,
        &[
            "DS1,VAR1,CLASS1,,Y",
            "DS1,GEO1,CLASS1,1,Y",
            "DS1,VAR1,CLASS1,1,",
            "DS1,GEO2,,,Y",
            "DS1,VAR2,,,",
            "DS1,VAR3,CLASS1,2,",
            "DS2,VAR3,CLASS3,1,",
        ],
    );
}

#[test]
fn test_clean_input_loads_everything() {
    let dir = TempDir::new().unwrap();
    write_clean_input(dir.path());

    let meta = Loader::new(dir.path(), Mode::Strict).load().unwrap();

    assert_eq!(meta.report.error_count(), 0);
    assert!(meta.report.entries().is_empty());
    assert_eq!(
        meta.classifications.keys().collect::<Vec<_>>(),
        vec!["CLASS1", "CLASS2"]
    );
    assert_eq!(meta.classifications["CLASS1"].categories.len(), 2);
    assert_eq!(meta.databases["DB1"].variables.len(), 3);
    assert_eq!(meta.variables.len(), 3);
    assert!(meta.variables["GEO1"].is_geographic());
    assert!(!meta.variables["VAR1"].is_geographic());

    let ds1 = &meta.datasets["DS1"];
    assert_eq!(ds1.database, "DB1");
    assert_eq!(ds1.variables.len(), 2);
    assert!(ds1.variables[1].lowest_geog);
    assert_eq!(ds1.entry_mnemonics(), vec!["CLASS1", "GEO1"]);
}

#[test]
fn test_defect_battery_best_effort() {
    let dir = TempDir::new().unwrap();
    write_defect_input(dir.path());

    let meta = Loader::new(dir.path(), Mode::BestEffort).load().unwrap();

    let expected = vec![
        "Classification.csv:3 no value supplied for required field Variable_Mnemonic",
        "Classification.csv:3 dropping record",
        "Classification.csv:4 duplicate value CLASS1 for Classification_Mnemonic",
        "Classification.csv:4 dropping record",
        "Classification.csv:5 invalid value x for Number_Of_Category_Items",
        "Category.csv Unexpected number of categories for CLASS1: expected 4 but found 1",
        "Database_Variable.csv Lowest_Geog_Variable_Flag set on GEO3 and GEO1 for database DB1",
        "Dataset_Variable.csv:1 Lowest_Geog_Variable_Flag set on non-geographic variable VAR1 for dataset DS1",
        "Dataset_Variable.csv:1 Processing_Priority not specified for classification CLASS1 in dataset DS1",
        "Dataset_Variable.csv:2 Classification_Mnemonic must not be specified for geographic variable GEO1 in dataset DS1",
        "Dataset_Variable.csv:2 Processing_Priority must not be specified for geographic variable GEO1 in dataset DS1",
        "Dataset_Variable.csv:3 duplicate value combo DS1/VAR1 for Dataset_Mnemonic/Variable_Mnemonic",
        "Dataset_Variable.csv:3 dropping record",
        "Dataset_Variable.csv:4 Lowest_Geog_Variable_Flag set on variable GEO2 and GEO1 for dataset DS1",
        "Dataset_Variable.csv:5 Classification must be specified for non-geographic VAR2 in dataset DS1",
        "Dataset_Variable.csv:5 dropping record",
        "Dataset_Variable.csv:6 Invalid classification CLASS1 specified for variable VAR3 in dataset DS1",
        "Dataset_Variable.csv:6 dropping record",
        "Dataset_Variable.csv Invalid processing_priorities [0] for dataset DS1",
        "Dataset.csv:2 DS2 has classification CLASS3 that is not in database DB1",
        "Dataset.csv:2 dropping record",
        "Dataset.csv:3 DS3 has no associated classifications or geographic variable",
        "Dataset.csv:3 dropping record",
        "16 errors were encountered during processing",
    ];
    assert_eq!(meta.report.messages(), expected);
    assert_eq!(meta.report.error_count(), 16);
    assert!(meta
        .report
        .entries()
        .iter()
        .all(|e| e.severity == Severity::Warning));

    // Dropped records are absent; everything else survives.
    assert_eq!(
        meta.classifications.keys().collect::<Vec<_>>(),
        vec!["CLASS1", "CLASS2", "CLASS5", "CLASS3"]
    );
    assert_eq!(meta.classifications["CLASS5"].declared_category_count, None);
    assert_eq!(meta.datasets.keys().collect::<Vec<_>>(), vec!["DS1"]);

    // First-seen lowest-geography flag wins in both graphs.
    let db1 = &meta.databases["DB1"];
    let flagged: Vec<&str> = db1
        .variables
        .iter()
        .filter(|v| v.lowest_geog)
        .map(|v| v.variable.as_str())
        .collect();
    assert_eq!(flagged, vec!["GEO1"]);

    let ds1 = &meta.datasets["DS1"];
    let flagged: Vec<&str> = ds1
        .variables
        .iter()
        .filter(|v| v.lowest_geog)
        .map(|v| v.variable.as_str())
        .collect();
    assert_eq!(flagged, vec!["GEO1"]);
    // Classification and priority were cleared on the geographic entry.
    assert_eq!(ds1.variables[1].classification, None);
    assert_eq!(ds1.variables[1].priority, None);
}

#[test]
fn test_defect_battery_strict_severity() {
    let dir = TempDir::new().unwrap();
    write_defect_input(dir.path());

    let meta = Loader::new(dir.path(), Mode::Strict).load().unwrap();

    assert_eq!(meta.report.error_count(), 16);
    assert!(meta
        .report
        .entries()
        .iter()
        .all(|e| e.severity == Severity::Error));
}

#[test]
fn test_idempotent_runs() {
    let dir = TempDir::new().unwrap();
    write_defect_input(dir.path());

    let first = Loader::new(dir.path(), Mode::BestEffort).load().unwrap();
    let second = Loader::new(dir.path(), Mode::BestEffort).load().unwrap();

    assert_eq!(first.report.messages(), second.report.messages());
    assert_eq!(
        dataset_metadata(&first).to_string(),
        dataset_metadata(&second).to_string()
    );
    assert_eq!(
        service_metadata(&first).to_string(),
        service_metadata(&second).to_string()
    );
}

#[test]
fn test_category_with_unknown_classification_dropped() {
    let dir = TempDir::new().unwrap();
    write_clean_input(dir.path());
    write_file(
        dir.path(),
        "Category.csv",
        CATEGORY_HEADER,
        &["CD1,CLASS1,Category 1,", "CD9,NOCLASS,Category 9,"],
    );

    let meta = Loader::new(dir.path(), Mode::BestEffort).load().unwrap();

    assert!(meta
        .report
        .messages()
        .contains(&"Category.csv:2 invalid value NOCLASS for Classification_Mnemonic"));
    assert!(meta.categories.get("NOCLASS").is_none());
    // CLASS1 declared two categories but only one survives here.
    assert!(meta
        .report
        .messages()
        .contains(&"Category.csv Unexpected number of categories for CLASS1: expected 2 but found 1"));
}

#[test]
fn test_duplicate_category_combo_first_wins() {
    let dir = TempDir::new().unwrap();
    write_clean_input(dir.path());
    write_file(
        dir.path(),
        "Category.csv",
        CATEGORY_HEADER,
        &[
            "CD1,CLASS1,Category 1,",
            "CD2,CLASS1,Category 2,",
            "CD1,CLASS1,Category 1 again,",
        ],
    );

    let meta = Loader::new(dir.path(), Mode::BestEffort).load().unwrap();

    assert!(meta.report.messages().contains(
        &"Category.csv:3 duplicate value combo CLASS1/CD1 for Classification_Mnemonic/Category_Code"
    ));
    let labels: Vec<&str> = meta.categories["CLASS1"]
        .iter()
        .map(|c| c.label.en.as_str())
        .collect();
    assert_eq!(labels, vec!["Category 1", "Category 2"]);
}

#[test]
fn test_dataset_variable_with_unknown_variable_dropped() {
    let dir = TempDir::new().unwrap();
    write_clean_input(dir.path());
    write_file(
        dir.path(),
        "Dataset_Variable.csv",
        DATASET_VARIABLE_HEADER,
        &["DS1,VAR1,CLASS1,1,", "DS1,NOVAR,CLASS1,2,", "DS1,GEO1,,,Y"],
    );

    let meta = Loader::new(dir.path(), Mode::BestEffort).load().unwrap();

    assert!(meta
        .report
        .messages()
        .contains(&"Dataset_Variable.csv:2 invalid value NOVAR for Variable_Mnemonic"));
    assert_eq!(meta.datasets["DS1"].variables.len(), 2);
}

#[test]
fn test_orphan_dataset_variable_group_reported() {
    let dir = TempDir::new().unwrap();
    write_clean_input(dir.path());
    write_file(
        dir.path(),
        "Dataset_Variable.csv",
        DATASET_VARIABLE_HEADER,
        &["DS1,VAR1,CLASS1,1,", "DS1,GEO1,,,Y", "DS9,VAR2,CLASS2,1,"],
    );

    let meta = Loader::new(dir.path(), Mode::BestEffort).load().unwrap();

    assert!(meta
        .report
        .messages()
        .contains(&"Dataset_Variable.csv no Dataset.csv record for dataset DS9"));
}

#[test]
fn test_dataset_with_unknown_database_dropped() {
    let dir = TempDir::new().unwrap();
    write_clean_input(dir.path());
    write_file(
        dir.path(),
        "Dataset.csv",
        DATASET_HEADER,
        &["DS1,Dataset 1,,Dataset 1 description,,NODB,PUB,1"],
    );

    let meta = Loader::new(dir.path(), Mode::BestEffort).load().unwrap();

    assert!(meta
        .report
        .messages()
        .contains(&"Dataset.csv:1 invalid value NODB for Database_Mnemonic"));
    assert!(meta.datasets.is_empty());
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_clean_input(dir.path());
    fs::remove_file(dir.path().join("Database.csv")).unwrap();

    let err = Loader::new(dir.path(), Mode::BestEffort).load().unwrap_err();
    assert!(err.to_string().contains("Database.csv"));
}

#[test]
fn test_bad_header_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_clean_input(dir.path());
    write_file(
        dir.path(),
        "Dataset.csv",
        "Dataset_Mnemonic,Dataset_Title",
        &["DS1,Dataset 1"],
    );

    let err = Loader::new(dir.path(), Mode::BestEffort).load().unwrap_err();
    assert!(err.to_string().contains("invalid header"));
}
