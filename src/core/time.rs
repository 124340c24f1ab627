use std::cell::Cell;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MONTH_FORMAT: &str = "%Y-%m";
const ID_PREFIX: &str = "REC";
const SEQUENCE_WRAP: u32 = 1000;

/// Clock abstracts access to the current timestamp so entry helpers remain deterministic in tests.
pub trait Clock {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

/// Real-time clock backed by the system time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Midnight UTC on the given date, or `None` for an invalid calendar date.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn today(&self) -> NaiveDate {
        self.instant.date_naive()
    }
}

/// Today's date as `YYYY-MM-DD`.
pub fn current_date(clock: &dyn Clock) -> String {
    clock.today().format(DATE_FORMAT).to_string()
}

/// The current month as a `YYYY-MM` period prefix.
pub fn current_month(clock: &dyn Clock) -> String {
    clock.today().format(MONTH_FORMAT).to_string()
}

/// Returns `true` when `value` is a real calendar date in `YYYY-MM-DD` form.
pub fn is_valid_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

/// Produces record ids of the form `REC<unix millis><3-digit sequence>`.
///
/// One generator belongs to one entry session; the sequence wraps after 999.
#[derive(Debug)]
pub struct RecordIdGenerator<C: Clock> {
    clock: C,
    sequence: Cell<u32>,
}

impl<C: Clock> RecordIdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            sequence: Cell::new(0),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn next_id(&self) -> String {
        let sequence = self.sequence.get();
        self.sequence.set((sequence + 1) % SEQUENCE_WRAP);
        format!(
            "{ID_PREFIX}{}{:03}",
            self.clock.now().timestamp_millis(),
            sequence
        )
    }
}

impl Default for RecordIdGenerator<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}
