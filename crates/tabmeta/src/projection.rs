//! Bilingual JSON projection of the validated graph.
//!
//! Two documents are produced from one structure: dataset metadata (every
//! public classification as a variable, plus one entry per database) and
//! service metadata (the predefined tables). Each document carries an English
//! and a Welsh variant keyed by a `lang` field; Welsh falls back to English
//! where no translation was supplied.

use log::info;
use serde_json::{json, Map, Value};

use crate::loader::Metadata;
use crate::model::{Classification, Database, Dataset, Lang};

/// Security marker that makes a record eligible for export. Classifications
/// and datasets carrying any other marker are skipped with an info log entry.
pub const PUBLIC_SECURITY_MNEMONIC: &str = "PUB";

/// Build the dataset metadata document: a `base` dataset holding every
/// public classification, followed by one dataset per database, for each
/// language in turn.
pub fn dataset_metadata(meta: &Metadata) -> Value {
    let public = public_classifications(meta);

    let mut documents = vec![
        base_dataset(&public, Lang::English),
        base_dataset(&public, Lang::Welsh),
    ];
    for database in meta.databases.values() {
        documents.push(database_dataset(database, Lang::English));
        documents.push(database_dataset(database, Lang::Welsh));
    }
    info!("Built dataset metadata for {} databases", meta.databases.len());

    Value::Array(documents)
}

/// Build the service metadata document: the public predefined tables, one
/// variant per language.
pub fn service_metadata(meta: &Metadata) -> Value {
    let public = public_datasets(meta);

    let documents: Vec<Value> = Lang::ALL
        .iter()
        .map(|&lang| {
            json!({
                "lang": lang.code(),
                "meta": {
                    "tables": public.iter().map(|d| table_value(d, lang)).collect::<Vec<_>>(),
                },
            })
        })
        .collect();
    info!("Built service metadata for {} tables", public.len());

    Value::Array(documents)
}

fn public_classifications(meta: &Metadata) -> Vec<&Classification> {
    meta.classifications
        .values()
        .filter(|classification| {
            let public = classification.security == PUBLIC_SECURITY_MNEMONIC;
            if !public {
                info!("Dropped non public classification: {}", classification.mnemonic);
            }
            public
        })
        .collect()
}

fn public_datasets(meta: &Metadata) -> Vec<&Dataset> {
    meta.datasets
        .values()
        .filter(|dataset| {
            let public = dataset.security == PUBLIC_SECURITY_MNEMONIC;
            if !public {
                info!("Dropped non public dataset: {}", dataset.mnemonic);
            }
            public
        })
        .collect()
}

fn base_dataset(public: &[&Classification], lang: Lang) -> Value {
    let label = match lang {
        Lang::English => "Base dataset with metadata for all variables",
        Lang::Welsh => "Set ddata sylfaenol gyda metadata ar gyfer pob newidyn",
    };
    let description = match lang {
        Lang::English => {
            "Base dataset containing metadata for all variables used across the \
             other datasets. Other datasets include it to avoid duplicating metadata."
        }
        Lang::Welsh => {
            "Set ddata sylfaenol sy'n cynnwys metadata ar gyfer pob newidyn a \
             ddefnyddir ar draws y setiau data eraill."
        }
    };
    json!({
        "name": "base",
        "label": label,
        "lang": lang.code(),
        "meta": {"Database_Description": description},
        "vars": public
            .iter()
            .map(|classification| variable_value(classification, lang))
            .collect::<Vec<_>>(),
    })
}

fn variable_value(classification: &Classification, lang: Lang) -> Value {
    let mut cat_labels = Map::new();
    for category in &classification.categories {
        cat_labels.insert(
            category.code.clone(),
            Value::String(category.label.text(lang).to_string()),
        );
    }

    let mut meta = Map::new();
    meta.insert(
        "Variable_Mnemonic".to_string(),
        Value::String(classification.variable.clone()),
    );
    meta.insert(
        "Security_Mnemonic".to_string(),
        Value::String(classification.security.clone()),
    );
    meta.insert(
        "Number_Of_Category_Items".to_string(),
        classification
            .declared_category_count
            .map_or(Value::Null, |n| Value::from(n)),
    );
    extend_with_extra(&mut meta, &classification.extra);

    json!({
        "name": classification.mnemonic,
        "label": classification.label.text(lang),
        "meta": meta,
        "catLabels": cat_labels,
    })
}

fn database_dataset(database: &Database, lang: Lang) -> Value {
    let mut meta = Map::new();
    meta.insert(
        "Database_Description".to_string(),
        Value::String(database.description.text(lang).to_string()),
    );
    extend_with_extra(&mut meta, &database.extra);

    json!({
        "name": database.mnemonic,
        "incl": [{"name": "base", "lang": lang.code()}],
        "label": database.title.text(lang),
        "lang": lang.code(),
        "meta": meta,
        "vars": null,
    })
}

fn table_value(dataset: &Dataset, lang: Lang) -> Value {
    let mut meta = Map::new();
    meta.insert(
        "Security_Mnemonic".to_string(),
        Value::String(dataset.security.clone()),
    );
    extend_with_extra(&mut meta, &dataset.extra);

    json!({
        "name": dataset.mnemonic,
        "label": dataset.title.text(lang),
        "description": dataset.description.text(lang),
        "datasetName": dataset.database,
        "vars": dataset.entry_mnemonics(),
        "meta": meta,
    })
}

fn extend_with_extra(meta: &mut Map<String, Value>, extra: &indexmap::IndexMap<String, String>) {
    for (key, value) in extra {
        meta.insert(key.clone(), Value::String(value.clone()));
    }
}
