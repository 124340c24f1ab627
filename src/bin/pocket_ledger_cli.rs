use std::{env, path::PathBuf, process};

use pocket_ledger::{
    config::ConfigManager,
    core::{
        services::{Search, SearchMode, StatisticsMode},
        time::{current_date, current_month, is_valid_date, RecordIdGenerator, SystemClock},
    },
    errors::CliError,
    init,
    ledger::{parse_amount_input, Ledger, Record, RecordType},
    storage::TextStorage,
};

const ALL_PERIODS: &str = "all";

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        process::exit(1);
    };
    let rest: Vec<String> = args.collect();

    let manager = ConfigManager::new();
    let config = manager.load()?;
    let storage = TextStorage::new(config.resolve_data_dir(manager.base_dir()));
    let mut ledger = Ledger::open(Box::new(storage))?.with_profile(config.profile.clone());

    match command.as_str() {
        "add" => {
            let [date, amount, kind, category, note @ ..] = rest.as_slice() else {
                return Err(CliError::Input(
                    "add <date|today> <amount> <I|E> <category> [note...]".into(),
                ));
            };
            let generator = RecordIdGenerator::default();
            let date = if date == "today" {
                current_date(generator.clock())
            } else {
                date.clone()
            };
            if !is_valid_date(&date) {
                return Err(CliError::Input(format!("`{date}` is not a YYYY-MM-DD date")));
            }
            let record = Record::new(
                generator.next_id(),
                date,
                parse_amount_input(amount),
                RecordType::from_input(kind),
                category.clone(),
                note.join(" "),
            );
            let line = record.to_string();
            ledger.add_record(record, true)?;
            println!("Added {line}");
        }
        "recent" => {
            let count = match rest.first() {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| CliError::Input(format!("`{raw}` is not a count")))?,
                None => config.recent_limit,
            };
            print_records(&ledger.recent_records(count));
        }
        "search" => {
            let (mode, search) = match rest.as_slice() {
                [mode, keyword] if mode == "keyword" => {
                    (SearchMode::Keyword, Search::new().with_keyword(keyword.clone()))
                }
                [mode, category] if mode == "category" => (
                    SearchMode::Category,
                    Search::new().with_category(category.clone()),
                ),
                [mode, from, to] if mode == "range" => (
                    SearchMode::Time,
                    Search::new().with_time_range(from.clone(), to.clone()),
                ),
                _ => {
                    return Err(CliError::Input(
                        "search keyword <text> | category <name> | range <from> <to>".into(),
                    ))
                }
            };
            print_records(&ledger.search_records(&search, mode));
        }
        "summary" => {
            let by_category = rest.iter().any(|arg| arg == "--by-category");
            let period = match rest.iter().find(|arg| !arg.starts_with("--")) {
                Some(period) if period == ALL_PERIODS => String::new(),
                Some(period) => period.clone(),
                None => config
                    .default_period
                    .clone()
                    .unwrap_or_else(|| current_month(&SystemClock)),
            };
            let mode = if by_category {
                StatisticsMode::Category
            } else {
                StatisticsMode::Time
            };
            let report = ledger.view_statistics(&period, mode);
            let summary = &report.summary;
            let label = if summary.period.is_empty() {
                ALL_PERIODS
            } else {
                summary.period.as_str()
            };
            println!("Period: {label}");
            println!(
                "Income: {:.2} | Expense: {:.2} | Balance: {:.2}",
                summary.income, summary.expense, summary.balance
            );
            println!("Records: {}", summary.count);
            for item in report.categories.unwrap_or_default() {
                println!(
                    "{}\t{:.2}\t{:.1}%",
                    item.category, item.amount, item.percentage
                );
            }
        }
        "categories" => {
            for category in ledger.categories() {
                let marker = if category.is_custom { "custom" } else { "built-in" };
                println!("{}\t{}\t{}", category.id, category.name, marker);
            }
        }
        "add-category" => {
            let name = rest.join(" ");
            let category = ledger.add_custom_category(name.trim())?;
            println!("Added category {} ({})", category.name, category.id);
        }
        "export" => {
            let path = rest
                .first()
                .map(PathBuf::from)
                .ok_or_else(|| CliError::Input("export <path>".into()))?;
            ledger.export_json(&path)?;
            println!("Exported ledger to {}", path.display());
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No records.");
        return;
    }
    for record in records {
        println!("{record}");
    }
}

fn print_usage() {
    eprintln!(
        "Usage:
  pocket_ledger_cli add <date|today> <amount> <I|E> <category> [note...]
  pocket_ledger_cli recent [count]
  pocket_ledger_cli search keyword <text>
  pocket_ledger_cli search category <name>
  pocket_ledger_cli search range <from> <to>
  pocket_ledger_cli summary [period|all] [--by-category]
  pocket_ledger_cli categories
  pocket_ledger_cli add-category <name>
  pocket_ledger_cli export <path>"
    );
}
