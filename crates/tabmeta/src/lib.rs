//! tabmeta: loader for statistical classification metadata held as CSV tables.
//!
//! The input is a directory of interrelated CSV tables describing
//! classifications, categories, databases and datasets. The loader enforces
//! referential integrity and field-level constraints across the tables,
//! resolves duplicates and broken references with deterministic policies, and
//! produces a cross-referenced object graph plus an ordered error/warning
//! trail. The projection step turns the validated graph into bilingual
//! (English/Welsh) JSON documents for a downstream cataloguing service.
//!
//! # Core principles
//!
//! - **Deterministic**: identical inputs yield a byte-identical graph and an
//!   identical ordered report, ties broken by file-row order.
//! - **Fail late**: data-level defects are logged and counted, never thrown;
//!   only structural problems (missing file, bad header) abort a run.
//!
//! # Example
//!
//! ```no_run
//! use tabmeta::{Loader, Mode};
//!
//! let loader = Loader::new("metadata/", Mode::Strict);
//! let meta = loader.load().unwrap();
//!
//! println!("classifications: {}", meta.classifications.len());
//! println!("defects: {}", meta.report.error_count());
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod projection;
pub mod reader;
pub mod report;
pub mod schema;

pub use error::{MetadataError, Result};
pub use loader::{Loader, Metadata};
pub use model::{
    Bilingual, Category, Classification, Database, DatabaseVariable, Dataset, DatasetVariable,
    Lang, Variable, VariableKind,
};
pub use projection::{dataset_metadata, service_metadata, PUBLIC_SECURITY_MNEMONIC};
pub use report::{Entry, Mode, Report, Severity};
