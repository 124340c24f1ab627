use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "pocket_ledger_cli";

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("POCKET_LEDGER_HOME", home.path());
    cmd
}

#[test]
fn add_then_list_recent_records() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add", "2025-01-01", "100", "I", "工资", "一月", "工资"])
        .assert()
        .success()
        .stdout(contains("2025-01-01 | +100 | 工资 | 一月 工资"));
    cli(&home)
        .args(["add", "2025-01-15", "50", "E", "餐饮"])
        .assert()
        .success();
    cli(&home)
        .args(["recent", "1"])
        .assert()
        .success()
        .stdout(contains("餐饮").and(contains("工资").not()));
    assert!(home.path().join("data").join("records.txt").exists());
}

#[test]
fn summary_by_category_prints_breakdown() {
    let home = TempDir::new().unwrap();
    for args in [
        ["add", "2025-01-01", "100", "I", "工资"],
        ["add", "2025-01-15", "50", "E", "餐饮"],
    ] {
        cli(&home).args(args).assert().success();
    }
    cli(&home)
        .args(["summary", "2025-01", "--by-category"])
        .assert()
        .success()
        .stdout(
            contains("Income: 100.00 | Expense: 50.00 | Balance: 50.00")
                .and(contains("Records: 2"))
                .and(contains("66.7%")),
        );
}

#[test]
fn invalid_date_is_rejected() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add", "2025-13-01", "10", "E", "餐饮"])
        .assert()
        .failure()
        .stderr(contains("not a YYYY-MM-DD date"));
}

#[test]
fn custom_categories_are_listed() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add-category", "宠物"])
        .assert()
        .success()
        .stdout(contains("custom_1"));
    cli(&home)
        .arg("categories")
        .assert()
        .success()
        .stdout(contains("custom_1\t宠物\tcustom").and(contains("c_food\t餐饮\tbuilt-in")));
}

#[test]
fn unknown_command_prints_usage() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(contains("Usage"));
}
