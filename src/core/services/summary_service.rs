//! Period and per-category totals over a record snapshot.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;

use crate::ledger::{Record, RecordType};

/// Which report [`Statistics`] is configured to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatisticsMode {
    #[default]
    Time,
    Category,
}

/// Income, expense and balance for the records matching a period prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSummary {
    pub period: String,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub count: usize,
}

/// Total for one category and its share of all category totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummaryItem {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Aggregates records whose date starts with `period`. An empty period includes everything.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    period: String,
    mode: StatisticsMode,
}

impl Statistics {
    pub fn new(period: impl Into<String>, mode: StatisticsMode) -> Self {
        Self {
            period: period.into(),
            mode,
        }
    }

    pub fn set_period(&mut self, period: impl Into<String>) {
        self.period = period.into();
    }

    pub fn set_mode(&mut self, mode: StatisticsMode) {
        self.mode = mode;
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    pub fn mode(&self) -> StatisticsMode {
        self.mode
    }

    fn in_period(&self, record: &Record) -> bool {
        self.period.is_empty() || record.date().starts_with(self.period.as_str())
    }

    pub fn summarize_by_time(&self, records: &[Record]) -> TimeSummary {
        let mut summary = TimeSummary {
            period: self.period.clone(),
            ..TimeSummary::default()
        };
        for record in records.iter().filter(|record| self.in_period(record)) {
            match record.record_type() {
                RecordType::Income => summary.income += record.amount(),
                RecordType::Expense => summary.expense += record.amount(),
            }
            summary.count += 1;
        }
        summary.balance = summary.income - summary.expense;
        summary
    }

    /// Per-category totals sorted by amount, largest first. Income and expense both add to a
    /// category's total.
    pub fn summarize_by_category(&self, records: &[Record]) -> Vec<CategorySummaryItem> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for record in records.iter().filter(|record| self.in_period(record)) {
            *totals.entry(record.category()).or_insert(0.0) += record.amount();
        }

        let grand_total: f64 = totals.values().sum();
        let mut items: Vec<CategorySummaryItem> = totals
            .into_iter()
            .map(|(category, amount)| CategorySummaryItem {
                category: category.to_string(),
                amount,
                percentage: if grand_total > 0.0 {
                    amount / grand_total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        // Stable: equal amounts keep category name order.
        items.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
        items
    }
}

/// Output of [`Statistics::report`]; the category breakdown is only present in category mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub summary: TimeSummary,
    pub categories: Option<Vec<CategorySummaryItem>>,
}

impl Statistics {
    pub fn report(&self, records: &[Record]) -> StatisticsReport {
        let categories = match self.mode {
            StatisticsMode::Category => Some(self.summarize_by_category(records)),
            StatisticsMode::Time => None,
        };
        StatisticsReport {
            summary: self.summarize_by_time(records),
            categories,
        }
    }
}
