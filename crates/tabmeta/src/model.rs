//! Validated metadata entities and the bilingual label type.
//!
//! Entities carry typed fields for everything the loader cross-references,
//! plus an `extra` ordered map holding the remaining declared columns so the
//! projection can carry them through untouched. Once the loader returns, the
//! graph is immutable.

use indexmap::IndexMap;
use serde::Serialize;

/// Output language for projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    English,
    Welsh,
}

impl Lang {
    /// Both output languages, English first.
    pub const ALL: [Lang; 2] = [Lang::English, Lang::Welsh];

    /// BCP 47 style language code used in the output documents.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::English => "en",
            Lang::Welsh => "cy",
        }
    }
}

/// An English/Welsh text pair.
///
/// Welsh text is frequently missing in the source tables; projection falls
/// back to the English text rather than emitting an empty label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bilingual {
    pub en: String,
    pub cy: Option<String>,
}

impl Bilingual {
    /// Build from raw cells; an empty Welsh cell means "not translated".
    pub fn new(en: &str, cy: &str) -> Self {
        Self {
            en: en.to_string(),
            cy: (!cy.is_empty()).then(|| cy.to_string()),
        }
    }

    /// Text for a language, falling back to English.
    pub fn text(&self, lang: Lang) -> &str {
        match lang {
            Lang::English => &self.en,
            Lang::Welsh => self.cy.as_deref().unwrap_or(&self.en),
        }
    }
}

/// A categorical grouping used for cross-tabulation (e.g. an age band).
#[derive(Debug, Clone)]
pub struct Classification {
    pub mnemonic: String,
    /// Mnemonic of the shared variable this classification breaks down.
    pub variable: String,
    pub label: Bilingual,
    /// Security marker gating export eligibility.
    pub security: String,
    /// Category count declared in Classification.csv, when parseable.
    pub declared_category_count: Option<u32>,
    /// Categories resolved from Category.csv, in file order.
    pub categories: Vec<Category>,
    pub extra: IndexMap<String, String>,
}

/// One value within a classification.
#[derive(Debug, Clone)]
pub struct Category {
    pub classification: String,
    pub code: String,
    pub label: Bilingual,
}

/// How a shared variable may be used in datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Carries no classification; candidates for the lowest-geography flag.
    Geographic,
    /// Must be broken down by one of its classifications.
    Categorical,
}

/// A variable shared across databases and datasets, derived from
/// Database_Variable.csv. The first-seen type code wins on conflict.
#[derive(Debug, Clone)]
pub struct Variable {
    pub mnemonic: String,
    pub kind: VariableKind,
}

impl Variable {
    pub fn is_geographic(&self) -> bool {
        self.kind == VariableKind::Geographic
    }
}

/// Membership of a variable in a database.
#[derive(Debug, Clone)]
pub struct DatabaseVariable {
    pub variable: String,
    /// Marks the most granular geographic variable of the database.
    /// At most one membership keeps this set after resolution.
    pub lowest_geog: bool,
}

/// A named collection of variables available together for tabulation.
#[derive(Debug, Clone)]
pub struct Database {
    pub mnemonic: String,
    pub title: Bilingual,
    pub description: Bilingual,
    /// Variable memberships in Database_Variable.csv file order.
    pub variables: Vec<DatabaseVariable>,
    pub extra: IndexMap<String, String>,
}

impl Database {
    pub fn contains_variable(&self, mnemonic: &str) -> bool {
        self.variables.iter().any(|dv| dv.variable == mnemonic)
    }
}

/// One (variable, classification, priority) entry of a dataset.
///
/// Geographic entries carry neither classification nor priority; the loader
/// clears both and records a defect when the source says otherwise.
#[derive(Debug, Clone)]
pub struct DatasetVariable {
    pub variable: String,
    pub classification: Option<String>,
    pub priority: Option<u32>,
    pub lowest_geog: bool,
}

/// A predefined table definition over a subset of a database's variables.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub mnemonic: String,
    pub title: Bilingual,
    pub description: Bilingual,
    /// Owning database mnemonic.
    pub database: String,
    pub security: String,
    /// Entries in Dataset_Variable.csv file order.
    pub variables: Vec<DatasetVariable>,
    pub extra: IndexMap<String, String>,
}

impl Dataset {
    /// Entry mnemonics in file order: the classification mnemonic for
    /// non-geographic entries, the variable mnemonic for geographic ones.
    pub fn entry_mnemonics(&self) -> Vec<&str> {
        self.variables
            .iter()
            .map(|dv| dv.classification.as_deref().unwrap_or(&dv.variable))
            .collect()
    }
}
