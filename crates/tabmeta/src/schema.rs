//! Versioned column lists for the input tables.
//!
//! Each input file has a fixed name and an exact, ordered header. A header
//! that does not match is a structural error and aborts the run; these lists
//! are the version contract with the metadata maintainers.

/// Fixed layout of one input CSV table.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// File name within the input directory.
    pub filename: &'static str,
    /// Exact ordered column list the header row must match.
    pub columns: &'static [&'static str],
    /// Columns that must be non-empty on every row.
    pub required: &'static [&'static str],
}

pub const CLASSIFICATION: TableSchema = TableSchema {
    filename: "Classification.csv",
    columns: &[
        "Classification_Mnemonic",
        "Variable_Mnemonic",
        "Classification_Label",
        "Classification_Label_Welsh",
        "Security_Mnemonic",
        "Number_Of_Category_Items",
        "Version",
    ],
    required: &[
        "Classification_Mnemonic",
        "Variable_Mnemonic",
        "Classification_Label",
        "Security_Mnemonic",
        "Version",
    ],
};

pub const CATEGORY: TableSchema = TableSchema {
    filename: "Category.csv",
    columns: &[
        "Category_Code",
        "Classification_Mnemonic",
        "Category_Label",
        "Category_Label_Welsh",
    ],
    required: &["Category_Code", "Classification_Mnemonic", "Category_Label"],
};

pub const DATABASE: TableSchema = TableSchema {
    filename: "Database.csv",
    columns: &[
        "Database_Mnemonic",
        "Database_Title",
        "Database_Title_Welsh",
        "Database_Description",
        "Database_Description_Welsh",
        "Version",
    ],
    required: &[
        "Database_Mnemonic",
        "Database_Title",
        "Database_Description",
        "Version",
    ],
};

pub const DATABASE_VARIABLE: TableSchema = TableSchema {
    filename: "Database_Variable.csv",
    columns: &[
        "Database_Mnemonic",
        "Variable_Mnemonic",
        "Variable_Type_Code",
        "Lowest_Geog_Variable_Flag",
    ],
    required: &["Database_Mnemonic", "Variable_Mnemonic", "Variable_Type_Code"],
};

pub const DATASET: TableSchema = TableSchema {
    filename: "Dataset.csv",
    columns: &[
        "Dataset_Mnemonic",
        "Dataset_Title",
        "Dataset_Title_Welsh",
        "Dataset_Description",
        "Dataset_Description_Welsh",
        "Database_Mnemonic",
        "Security_Mnemonic",
        "Version",
    ],
    required: &[
        "Dataset_Mnemonic",
        "Dataset_Title",
        "Dataset_Description",
        "Database_Mnemonic",
        "Security_Mnemonic",
        "Version",
    ],
};

pub const DATASET_VARIABLE: TableSchema = TableSchema {
    filename: "Dataset_Variable.csv",
    columns: &[
        "Dataset_Mnemonic",
        "Variable_Mnemonic",
        "Classification_Mnemonic",
        "Processing_Priority",
        "Lowest_Geog_Variable_Flag",
    ],
    required: &["Dataset_Mnemonic", "Variable_Mnemonic"],
};

/// All tables in processing order.
pub const ALL_TABLES: &[&TableSchema] = &[
    &CLASSIFICATION,
    &CATEGORY,
    &DATABASE,
    &DATABASE_VARIABLE,
    &DATASET_VARIABLE,
    &DATASET,
];
