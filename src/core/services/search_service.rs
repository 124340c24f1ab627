//! Record filtering by keyword, category, or date range.

use crate::ledger::Record;

/// Which criterion [`Search::run`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Keyword,
    Category,
    Time,
}

/// Search criteria. Each filter reads only its own criterion and treats an empty criterion as
/// matching nothing; combine filters by re-filtering a previous result.
#[derive(Debug, Clone, Default)]
pub struct Search {
    keyword: String,
    category: String,
    from: String,
    to: String,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Sets the inclusive date range. Both bounds are required for a time search.
    pub fn set_time_range(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.from = from.into();
        self.to = to.into();
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn time_range(&self) -> (&str, &str) {
        (&self.from, &self.to)
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.set_keyword(keyword);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(category);
        self
    }

    pub fn with_time_range(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.set_time_range(from, to);
        self
    }

    pub fn run(&self, mode: SearchMode, records: &[Record]) -> Vec<Record> {
        match mode {
            SearchMode::Keyword => self.by_keyword(records),
            SearchMode::Category => self.by_category(records),
            SearchMode::Time => self.by_time(records),
        }
    }

    /// Case-sensitive substring match against the note or the category.
    pub fn by_keyword(&self, records: &[Record]) -> Vec<Record> {
        if self.keyword.is_empty() {
            return Vec::new();
        }
        filter(records, |record| {
            record.note().contains(self.keyword.as_str())
                || record.category().contains(self.keyword.as_str())
        })
    }

    /// Exact, case-sensitive category match.
    pub fn by_category(&self, records: &[Record]) -> Vec<Record> {
        if self.category.is_empty() {
            return Vec::new();
        }
        filter(records, |record| record.category() == self.category)
    }

    /// Records whose date string falls within `[from, to]`.
    pub fn by_time(&self, records: &[Record]) -> Vec<Record> {
        if self.from.is_empty() || self.to.is_empty() {
            return Vec::new();
        }
        filter(records, |record| {
            let date = record.date();
            date >= self.from.as_str() && date <= self.to.as_str()
        })
    }
}

fn filter<F>(records: &[Record], predicate: F) -> Vec<Record>
where
    F: Fn(&Record) -> bool,
{
    records
        .iter()
        .filter(|record| predicate(*record))
        .cloned()
        .collect()
}
