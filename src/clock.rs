//! Calendar clock abstraction.
//!
//! Date validation depends on "today" in the user's local time zone. The
//! booking engine takes the clock as a collaborator so tests and scripted
//! sessions can pin it.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Today's date in the local time zone.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date, for deterministic scenarios.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
