//! Ledger entries and their single-line text encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

const FIELD_DELIMITER: &str = "\t";
const FIELD_COUNT: usize = 6;

/// Direction of money flow for a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordType {
    Income,
    Expense,
}

impl RecordType {
    /// Single-letter code written to the records file.
    pub fn code(self) -> &'static str {
        match self {
            RecordType::Income => "I",
            RecordType::Expense => "E",
        }
    }

    /// Decodes a stored type code. Anything other than `I` is treated as an expense.
    pub fn from_code(code: &str) -> Self {
        if code == "I" {
            RecordType::Income
        } else {
            RecordType::Expense
        }
    }

    /// Interprets free-form entry text the way the entry form does: `1`, `I` or `i` select
    /// income and every other answer falls back to expense.
    pub fn from_input(input: &str) -> Self {
        match input.trim() {
            "1" | "I" | "i" => RecordType::Income,
            _ => RecordType::Expense,
        }
    }

    fn sign(self) -> char {
        match self {
            RecordType::Income => '+',
            RecordType::Expense => '-',
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordType::Income => "Income",
            RecordType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// One dated ledger entry. Fields are read-only once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    id: String,
    date: String,
    amount: f64,
    #[serde(rename = "type")]
    record_type: RecordType,
    category: String,
    note: String,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        amount: f64,
        record_type: RecordType,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            amount,
            record_type,
            category: category.into(),
            note: note.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Calendar date in `YYYY-MM-DD` form.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Ordering key used by the ledger: date first, id as tie-break.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.date, &self.id)
    }

    /// Encodes the record as `id, date, amount, type, category, note` separated by tabs.
    ///
    /// Text fields are backslash-escaped so embedded tabs and line breaks survive a reload.
    pub fn to_line(&self) -> String {
        let fields = [
            escape_field(&self.id),
            escape_field(&self.date),
            self.amount.to_string(),
            self.record_type.code().to_string(),
            escape_field(&self.category),
            escape_field(&self.note),
        ];
        fields.join(FIELD_DELIMITER)
    }

    /// Decodes a line produced by [`Record::to_line`].
    ///
    /// Lines with fewer than six fields are rejected; trailing extra fields are ignored. An
    /// unparsable amount becomes `0.0`.
    pub fn from_line(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if parts.len() < FIELD_COUNT {
            return Err(LedgerError::MalformedRecord {
                fields: parts.len(),
                line: line.to_string(),
            });
        }
        Ok(Self {
            id: unescape_field(parts[0]),
            date: unescape_field(parts[1]),
            amount: parse_amount_input(parts[2]),
            record_type: RecordType::from_code(parts[3]),
            category: unescape_field(parts[4]),
            note: unescape_field(parts[5]),
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}{} | {} | {}",
            self.date,
            self.record_type.sign(),
            self.amount,
            self.category,
            self.note
        )
    }
}

/// Parses a user or file supplied amount, falling back to `0.0` when the text is not a number.
pub fn parse_amount_input(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

pub(crate) fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub(crate) fn unescape_field(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => unescaped.push('\\'),
            Some('t') => unescaped.push('\t'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}
