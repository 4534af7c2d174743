//! Calendar-date validation for booking input.
//!
//! Dates arrive from the presentation layer as `YYYY-MM-DD` strings.
//! The predicates here are deliberately permissive on empty or malformed
//! input: well-formedness is a separate check, enforced where a date is
//! committed to the booking state.

use chrono::{Days, NaiveDate};

/// Strictly parse a `YYYY-MM-DD` string into a calendar date.
///
/// Requires exactly 4-2-2 digit groups and a real calendar date, so
/// `2024-6-1`, `2024-13-01` and `2024-02-30` are all rejected.
pub fn parse(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// True iff `s` is a complete, real `YYYY-MM-DD` calendar date.
pub fn is_well_formed(s: &str) -> bool {
    parse(s).is_some()
}

/// True if `s` is empty, malformed, or denotes a date on or after `today`.
pub fn is_not_past(s: &str, today: NaiveDate) -> bool {
    match parse(s) {
        Some(date) => date >= today,
        None => true,
    }
}

/// True if either input is empty or malformed, or `dropoff` is strictly
/// later than `pickup` (calendar-day granularity).
pub fn is_after(dropoff: &str, pickup: &str) -> bool {
    match (parse(dropoff), parse(pickup)) {
        (Some(dropoff), Some(pickup)) => dropoff > pickup,
        _ => true,
    }
}

/// Lower bound for the dropoff input: the day after pickup, or `today`
/// when no pickup is set. A UI hint, not an invariant.
pub fn min_dropoff(pickup: &str, today: NaiveDate) -> NaiveDate {
    parse(pickup)
        .and_then(|date| date.checked_add_days(Days::new(1)))
        .unwrap_or(today)
}
