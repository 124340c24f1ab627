use std::{
    fs, io,
    path::{Path, PathBuf},
    str,
};

use tracing::{debug, warn};

use crate::{
    errors::Result,
    ledger::{
        record::{escape_field, unescape_field},
        Category, Record,
    },
    utils::persistence::write_atomic,
};

use super::{DroppedRow, LedgerStorage, RecordLoad};

pub const RECORDS_FILE: &str = "records.txt";
pub const CATEGORIES_FILE: &str = "categories.txt";

/// Tab-separated text files inside a single data directory.
#[derive(Debug, Clone)]
pub struct TextStorage {
    dir: PathBuf,
}

impl TextStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    pub fn records_path(&self) -> PathBuf {
        self.dir.join(RECORDS_FILE)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.dir.join(CATEGORIES_FILE)
    }

    fn prepare_dir(&self) -> Result<()> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl LedgerStorage for TextStorage {
    fn ensure_data_dir(&self) -> bool {
        match self.prepare_dir() {
            Ok(()) => true,
            Err(err) => {
                warn!(dir = %self.dir.display(), "cannot create data directory: {err}");
                false
            }
        }
    }

    fn save_records(&self, records: &[Record]) -> Result<()> {
        self.prepare_dir()?;
        let mut contents = String::new();
        for record in records {
            contents.push_str(&record.to_line());
            contents.push('\n');
        }
        let path = self.records_path();
        write_atomic(&path, &contents)?;
        debug!(path = %path.display(), count = records.len(), "records saved");
        Ok(())
    }

    fn load_records_report(&self) -> Result<RecordLoad> {
        let path = self.records_path();
        let Some(data) = read_optional(&path)? else {
            return Ok(RecordLoad::default());
        };
        let mut report = RecordLoad::default();
        for (index, raw) in raw_lines(&data).enumerate() {
            if raw.is_empty() {
                continue;
            }
            let line = match str::from_utf8(raw) {
                Ok(line) => line,
                Err(err) => {
                    warn!(path = %path.display(), line = index + 1, "record line is not valid UTF-8: {err}");
                    report.dropped.push(DroppedRow {
                        line_number: index + 1,
                        line: String::from_utf8_lossy(raw).into_owned(),
                        reason: "invalid UTF-8".to_string(),
                    });
                    continue;
                }
            };
            match Record::from_line(line) {
                Ok(record) => report.records.push(record),
                Err(err) => {
                    warn!(path = %path.display(), line = index + 1, "failed to parse record line: {err}");
                    report.dropped.push(DroppedRow {
                        line_number: index + 1,
                        line: line.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        debug!(
            path = %path.display(),
            loaded = report.records.len(),
            dropped = report.dropped.len(),
            "records loaded"
        );
        Ok(report)
    }

    fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.prepare_dir()?;
        let mut contents = String::new();
        for category in categories.iter().filter(|c| c.is_custom) {
            contents.push_str(&escape_field(&category.id));
            contents.push('\t');
            contents.push_str(&escape_field(&category.name));
            contents.push_str("\t1\n");
        }
        let path = self.categories_path();
        write_atomic(&path, &contents)?;
        debug!(path = %path.display(), "custom categories saved");
        Ok(())
    }

    fn load_categories(&self) -> Result<Vec<Category>> {
        let path = self.categories_path();
        let Some(data) = read_optional(&path)? else {
            return Ok(Vec::new());
        };
        let mut categories = Vec::new();
        for (index, raw) in raw_lines(&data).enumerate() {
            if raw.is_empty() {
                continue;
            }
            let Ok(line) = str::from_utf8(raw) else {
                warn!(path = %path.display(), line = index + 1, "skipping category line that is not valid UTF-8");
                continue;
            };
            let mut fields = line.split('\t');
            let id = fields.next().unwrap_or_default();
            let name = fields.next().unwrap_or_default();
            if id.is_empty() || name.is_empty() {
                warn!(path = %path.display(), "skipping category line without id or name");
                continue;
            }
            let is_custom = fields.next().map_or(true, |flag| flag == "1");
            categories.push(Category::new(
                unescape_field(id),
                unescape_field(name),
                is_custom,
            ));
        }
        Ok(categories)
    }
}

/// Splits raw file contents on `\n`, dropping a trailing `\r` from each line.
fn raw_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    data.split(|byte| *byte == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            warn!(path = %path.display(), "cannot read ledger file: {err}");
            Err(err.into())
        }
    }
}
