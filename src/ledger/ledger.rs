use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    core::services::{Search, SearchMode, Statistics, StatisticsMode, StatisticsReport},
    errors::Result,
    storage::{DroppedRow, LedgerStorage},
};

use super::{
    category::{Category, CategoryMergePolicy},
    record::Record,
};

/// Identity of the person the ledger belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerProfile {
    pub user_id: String,
    pub username: String,
}

impl LedgerProfile {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

impl Default for LedgerProfile {
    fn default() -> Self {
        Self::new("user001", "默认用户")
    }
}

/// Owned copy of everything a ledger holds, suitable for export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerSnapshot {
    pub profile: LedgerProfile,
    pub records: Vec<Record>,
    pub categories: Vec<Category>,
}

/// What [`Ledger::load`] found on disk besides the data itself.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub records: usize,
    pub dropped: Vec<DroppedRow>,
    pub skipped_categories: Vec<Category>,
    pub warnings: Vec<String>,
}

/// In-memory owner of one user's records and categories.
///
/// Records stay sorted by `(date, id)`. Reads hand out copies; writes go through
/// [`Ledger::add_record`] and [`Ledger::add_custom_category`]. Not synchronised: share across
/// threads only behind external locking.
pub struct Ledger {
    profile: LedgerProfile,
    records: Vec<Record>,
    categories: Vec<Category>,
    merge_policy: CategoryMergePolicy,
    storage: Box<dyn LedgerStorage>,
}

impl Ledger {
    /// Creates an empty ledger with the default categories. Nothing is read from storage.
    pub fn new(storage: Box<dyn LedgerStorage>) -> Self {
        Self {
            profile: LedgerProfile::default(),
            records: Vec::new(),
            categories: Category::defaults(),
            merge_policy: CategoryMergePolicy::default(),
            storage,
        }
    }

    /// Creates a ledger and populates it from storage.
    pub fn open(storage: Box<dyn LedgerStorage>) -> Result<Self> {
        let mut ledger = Self::new(storage);
        ledger.load()?;
        Ok(ledger)
    }

    pub fn with_profile(mut self, profile: LedgerProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_merge_policy(mut self, policy: CategoryMergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    pub fn profile(&self) -> &LedgerProfile {
        &self.profile
    }

    pub fn storage(&self) -> &dyn LedgerStorage {
        self.storage.as_ref()
    }

    /// Inserts a record, restores the sort order and, when `auto_save` is set, persists.
    ///
    /// Duplicate ids are accepted. The record stays in memory even if the save fails.
    pub fn add_record(&mut self, record: Record, auto_save: bool) -> Result<()> {
        debug!(id = record.id(), date = record.date(), "adding record");
        self.records.push(record);
        sort_records(&mut self.records);
        if auto_save {
            self.save()?;
        }
        Ok(())
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// The last `count` records in sort order.
    pub fn recent_records(&self, count: usize) -> Vec<Record> {
        let start = self.records.len().saturating_sub(count);
        self.records[start..].to_vec()
    }

    /// Adds a custom category with a fresh `custom_N` id and saves immediately.
    pub fn add_custom_category(&mut self, name: &str) -> Result<Category> {
        let category = Category::add_custom(&mut self.categories, name);
        info!(id = %category.id, name = %category.name, "custom category added");
        self.save()?;
        Ok(category)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    pub fn category_names(&self) -> Vec<String> {
        Category::names(&self.categories)
    }

    pub fn search_records(&self, search: &Search, mode: SearchMode) -> Vec<Record> {
        search.run(mode, &self.records)
    }

    pub fn view_statistics(&self, period: &str, mode: StatisticsMode) -> StatisticsReport {
        Statistics::new(period, mode).report(&self.records)
    }

    /// Replaces the in-memory state with what storage holds.
    ///
    /// Defaults are rebuilt and stored customs merged under the ledger's merge policy. On error
    /// the current state is left untouched.
    pub fn load(&mut self) -> Result<LoadSummary> {
        let report = self.storage.load_records_report()?;
        let stored_categories = self.storage.load_categories()?;

        let mut records = report.records;
        sort_records(&mut records);
        let mut categories = Category::defaults();
        let merge = self.merge_policy.merge(&mut categories, stored_categories);
        for warning in &merge.warnings {
            warn!("{warning}");
        }

        self.records = records;
        self.categories = categories;
        let summary = LoadSummary {
            records: self.records.len(),
            dropped: report.dropped,
            skipped_categories: merge.skipped,
            warnings: merge.warnings,
        };
        info!(
            records = summary.records,
            dropped = summary.dropped.len(),
            categories = self.categories.len(),
            "ledger loaded"
        );
        Ok(summary)
    }

    /// Writes records and categories. Both writes are attempted; the first failure is returned
    /// and a successful records write is not rolled back.
    pub fn save(&self) -> Result<()> {
        let records = self.storage.save_records(&self.records);
        if let Err(err) = &records {
            warn!("saving records failed: {err}");
        }
        let categories = self.storage.save_categories(&self.categories);
        if let Err(err) = &categories {
            warn!("saving categories failed: {err}");
        }
        records.and(categories)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            profile: self.profile.clone(),
            records: self.records.clone(),
            categories: self.categories.clone(),
        }
    }

    pub fn export_json(&self, path: &Path) -> Result<()> {
        self.storage.export_json(&self.snapshot(), path)
    }
}

fn sort_records(records: &mut [Record]) {
    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
