mod common;

use std::fs;

use common::{opened_ledger, sample_records, temp_storage};
use pocket_ledger::{
    ledger::{Category, Ledger, LedgerSnapshot, Record, RecordType},
    storage::{LedgerStorage, TextStorage},
    utils::persistence::tmp_path,
};

#[test]
fn saved_records_load_back_in_order() {
    let (storage, _guard) = temp_storage();
    let records = sample_records();
    storage.save_records(&records).expect("save records");
    let loaded = storage.load_records().expect("load records");
    assert_eq!(loaded, records);
}

#[test]
fn special_characters_and_edge_amounts_roundtrip() {
    let (storage, _guard) = temp_storage();
    let long = "A".repeat(1000);
    let records = vec![
        Record::new("r1", "2025-01-01", 100.0, RecordType::Income, "工资", "测试\n\t"),
        Record::new("r2", "2025-01-01", 0.0, RecordType::Expense, "其他", "零金额"),
        Record::new("r3", "2025-01-01", -100.0, RecordType::Expense, "退款", "负数"),
        Record::new("r4", "2025-01-01", 999999.99, RecordType::Income, long.clone(), long),
        Record::new("", "", 0.0, RecordType::Expense, "", ""),
    ];
    storage.save_records(&records).unwrap();
    let loaded = storage.load_records().unwrap();
    assert_eq!(loaded.len(), 5);
    assert_eq!(loaded[0].note(), "测试\n\t");
    assert_eq!(loaded[2].amount(), -100.0);
    assert_eq!(loaded[3].amount(), 999999.99);
    assert_eq!(loaded[3].category().len(), 1000);
    assert!(loaded[4].id().is_empty());
}

#[test]
fn saving_replaces_previous_contents() {
    let (storage, _guard) = temp_storage();
    storage.save_records(&sample_records()).unwrap();
    let replacement = vec![Record::new(
        "r9",
        "2025-03-01",
        200.0,
        RecordType::Expense,
        "餐饮",
        "第二次",
    )];
    storage.save_records(&replacement).unwrap();
    let loaded = storage.load_records().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id(), "r9");
    assert!(!tmp_path(&storage.records_path()).exists());
}

#[test]
fn only_custom_categories_are_written() {
    let (storage, _guard) = temp_storage();
    let categories = vec![
        Category::new("c1", "默认类别", false),
        Category::new("c2", "自定义类别", true),
        Category::new("c3", "自定义\t二", true),
    ];
    storage.save_categories(&categories).unwrap();
    let raw = fs::read_to_string(storage.categories_path()).unwrap();
    assert!(raw.starts_with("c2\t自定义类别\t1\n"));
    let loaded = storage.load_categories().unwrap();
    assert_eq!(loaded, vec![categories[1].clone(), categories[2].clone()]);
}

#[test]
fn nonexistent_data_directory_loads_empty() {
    let storage = TextStorage::new("/nonexistent/pocket-ledger/data");
    assert!(storage.load_records().unwrap().is_empty());
    assert!(storage.load_categories().unwrap().is_empty());
    let ledger = Ledger::open(Box::new(storage)).expect("open empty ledger");
    assert_eq!(ledger.record_count(), 0);
    assert_eq!(ledger.categories().len(), 5);
}

#[test]
fn ledger_state_survives_reopen() {
    let (storage, _guard) = temp_storage();
    {
        let mut ledger = opened_ledger(&storage);
        for record in sample_records().into_iter().rev() {
            ledger.add_record(record, true).unwrap();
        }
        ledger.add_custom_category("宠物").unwrap();
        ledger.add_custom_category("").unwrap();
    }
    let reopened = opened_ledger(&storage);
    let ids: Vec<String> = reopened
        .records()
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(ids, vec!["r1", "r2", "r3"]);
    let customs: Vec<Category> = reopened
        .categories()
        .into_iter()
        .filter(|c| c.is_custom)
        .collect();
    assert_eq!(customs.len(), 2);
    assert_eq!(customs[0].id, "custom_1");
    assert_eq!(customs[1].name, "自定义");
}

#[test]
fn load_reports_dropped_rows_and_keeps_the_rest() {
    let (storage, _guard) = temp_storage();
    storage.ensure_data_dir();
    fs::write(
        storage.records_path(),
        "r1\t2025-01-01\t100\tI\t工资\tok\ntruncated\t2025-01-02\nr2\t2025-01-03\toops\tX\t餐饮\t\n",
    )
    .unwrap();
    let mut ledger = Ledger::new(Box::new(storage.clone()));
    let summary = ledger.load().expect("load");
    assert_eq!(summary.records, 2);
    assert_eq!(summary.dropped.len(), 1);
    assert_eq!(summary.dropped[0].line_number, 2);
    let records = ledger.records();
    assert_eq!(records[1].amount(), 0.0);
    assert_eq!(records[1].record_type(), RecordType::Expense);
}

#[test]
fn undecodable_row_is_dropped_and_the_rest_still_loads() {
    let (storage, _guard) = temp_storage();
    storage.ensure_data_dir();
    let mut raw = b"r1\t2025-01-01\t100\tI\t\xe5\xb7\xa5\xe8\xb5\x84\tok\n".to_vec();
    raw.extend_from_slice(b"r2\t2025-01-02\t5\tE\t\xff\xfe\tbad\n");
    raw.extend_from_slice(b"r3\t2025-01-03\t7\tE\tother\tok\r\n");
    fs::write(storage.records_path(), raw).unwrap();
    fs::write(
        storage.categories_path(),
        b"custom_1\t\xff\t1\ncustom_2\tpets\t1\n".as_slice(),
    )
    .unwrap();

    let report = storage.load_records_report().expect("load records");
    let ids: Vec<&str> = report.records.iter().map(|record| record.id()).collect();
    assert_eq!(ids, ["r1", "r3"]);
    assert_eq!(report.records[0].category(), "工资");
    assert_eq!(report.records[1].note(), "ok");
    assert_eq!(report.dropped.len(), 1);
    assert_eq!(report.dropped[0].line_number, 2);
    assert_eq!(report.dropped[0].reason, "invalid UTF-8");

    let mut ledger = Ledger::open(Box::new(storage.clone())).expect("open ledger");
    assert_eq!(ledger.record_count(), 2);
    let summary = ledger.load().expect("reload");
    assert_eq!(summary.dropped.len(), 1);
    let categories = ledger.categories();
    let customs: Vec<&Category> = categories.iter().filter(|c| c.is_custom).collect();
    assert_eq!(customs.len(), 1);
    assert_eq!(customs[0].name, "pets");
}

#[test]
fn legacy_default_name_in_categories_file_is_ignored() {
    let (storage, _guard) = temp_storage();
    storage.ensure_data_dir();
    fs::write(
        storage.categories_path(),
        "custom_1\t交通\t1\ncustom_2\t宠物\t1\n",
    )
    .unwrap();
    let mut ledger = Ledger::new(Box::new(storage.clone()));
    let summary = ledger.load().unwrap();
    assert_eq!(summary.skipped_categories.len(), 1);
    assert_eq!(ledger.categories().len(), 6);
    let added = ledger.add_custom_category("旅行").unwrap();
    assert_eq!(added.id, "custom_1");
}

#[test]
fn export_writes_json_snapshot() {
    let (storage, guard) = temp_storage();
    let mut ledger = opened_ledger(&storage);
    for record in sample_records() {
        ledger.add_record(record, false).unwrap();
    }
    let path = guard.path().join("export").join("ledger.json");
    ledger.export_json(&path).expect("export");
    let raw = fs::read_to_string(&path).unwrap();
    let snapshot: LedgerSnapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(snapshot, ledger.snapshot());
    assert!(raw.contains("\"type\": \"Income\""));
}
