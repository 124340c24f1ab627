#![allow(dead_code)]

use pocket_ledger::{
    ledger::{Ledger, Record, RecordType},
    storage::TextStorage,
};
use tempfile::TempDir;

/// Text storage rooted in a fresh temporary directory. Keep the guard alive for the test.
pub fn temp_storage() -> (TextStorage, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let storage = TextStorage::new(temp.path().join("data"));
    (storage, temp)
}

pub fn opened_ledger(storage: &TextStorage) -> Ledger {
    Ledger::open(Box::new(storage.clone())).expect("open ledger")
}

/// The three-record month used across the summary scenarios.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new("r1", "2025-01-01", 100.0, RecordType::Income, "工资", "一月工资"),
        Record::new("r2", "2025-01-15", 50.0, RecordType::Expense, "餐饮", "聚餐"),
        Record::new("r3", "2025-02-01", 200.0, RecordType::Income, "奖金", "年终奖"),
    ]
}
