//! Date parsing for human-entered CSV fields.
//!
//! Rather than a guess-anything parser, a fixed set of formats is tried in
//! order. Datetime inputs keep only the date part; a trailing ` UTC` or `Z`
//! (Coinbase export style) is stripped first.
//!
//! Accepted formats:
//! - `%Y-%m-%dT%H:%M:%S%.f`, `%Y-%m-%d %H:%M:%S%.f`
//! - `%Y-%m-%d`, `%Y/%m/%d`
//! - `%m/%d/%Y`, `%d/%m/%Y`, `%m-%d-%Y`, `%d-%m-%Y`
//! - `%B %d, %Y`, `%b %d, %Y`, `%d %B %Y`, `%d %b %Y`
//!
//! The try-order is the day/month heuristic: an ambiguous all-numeric date
//! such as `03/04/2023` resolves month-first (March 4), while `15/01/2023`
//! resolves day-first because 15 cannot be a month.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a date using the documented format list, or `None` if nothing matches.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_suffix(" UTC")
        .or_else(|| trimmed.strip_suffix('Z'))
        .unwrap_or(trimmed);

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}
