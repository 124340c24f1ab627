pub mod text_backend;

use std::path::Path;

use crate::{
    errors::Result,
    ledger::{Category, LedgerSnapshot, Record},
    utils::persistence,
};

/// A line that could not be decoded during a bulk load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-based line number within the file.
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

/// Records recovered from disk together with the rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct RecordLoad {
    pub records: Vec<Record>,
    pub dropped: Vec<DroppedRow>,
}

/// Abstraction over persistence backends capable of storing records and custom categories.
///
/// Every write replaces the whole file. A missing file loads as an empty collection.
pub trait LedgerStorage: Send + Sync {
    /// Creates the data directory when absent. Returns `false` if it could not be created.
    fn ensure_data_dir(&self) -> bool;
    fn save_records(&self, records: &[Record]) -> Result<()>;
    fn load_records_report(&self) -> Result<RecordLoad>;
    fn save_categories(&self, categories: &[Category]) -> Result<()>;
    fn load_categories(&self) -> Result<Vec<Category>>;

    fn load_records(&self) -> Result<Vec<Record>> {
        Ok(self.load_records_report()?.records)
    }

    fn export_json(&self, snapshot: &LedgerSnapshot, path: &Path) -> Result<()> {
        persistence::save_json_to_file(snapshot, path)
    }
}

pub use text_backend::{TextStorage, CATEGORIES_FILE, RECORDS_FILE};
