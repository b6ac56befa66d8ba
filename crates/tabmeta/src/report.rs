//! Deterministic error/warning trail for a load run.
//!
//! Every recoverable defect is appended here in discovery order and also
//! emitted through the `log` facade. The entry list is part of the loader's
//! public contract: identical inputs must produce an identical ordered list.

use log::{error, info, warn};
use serde::Serialize;

/// Leniency mode for a load run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Defects are logged as errors; a run with any defect should fail.
    Strict,
    /// Defects are downgraded to warnings and the run still succeeds.
    BestEffort,
}

/// Severity of a report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One logged line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub severity: Severity,
    pub message: String,
}

/// Ordered trail of every recoverable defect in a run.
#[derive(Debug)]
pub struct Report {
    mode: Mode,
    entries: Vec<Entry>,
    errors: usize,
}

impl Report {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
            errors: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of counted defects so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry messages in order, for assertions and diffing.
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    /// Record a counted defect against a specific row.
    pub fn defect(&mut self, file: &str, row: usize, message: &str) {
        self.errors += 1;
        self.push_defect(format!("{file}:{row} {message}"));
    }

    /// Record a counted defect for a table-level check with no single row.
    pub fn table_defect(&mut self, file: &str, message: &str) {
        self.errors += 1;
        self.push_defect(format!("{file} {message}"));
    }

    /// Companion line for a dropped record; not counted.
    pub fn drop_record(&mut self, file: &str, row: usize) {
        self.push_defect(format!("{file}:{row} dropping record"));
    }

    /// Informational entry (export filtering and the like); not counted.
    pub fn note(&mut self, message: String) {
        info!("{message}");
        self.entries.push(Entry {
            severity: Severity::Info,
            message,
        });
    }

    /// Emit the final summary line when any defect was counted.
    pub fn finish(&mut self) {
        if self.errors > 0 {
            let message = format!("{} errors were encountered during processing", self.errors);
            self.push_defect(message);
        }
    }

    fn push_defect(&mut self, message: String) {
        let severity = match self.mode {
            Mode::Strict => Severity::Error,
            Mode::BestEffort => Severity::Warning,
        };
        match severity {
            Severity::Error => error!("{message}"),
            _ => warn!("{message}"),
        }
        self.entries.push(Entry { severity, message });
    }
}
