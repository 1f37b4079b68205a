//! Free-text deadline parsing.
//!
//! Deadlines arrive as chat text and are matched against a fixed, ordered
//! list of accepted formats; the first format that parses wins. Date-only
//! inputs resolve to midnight. The core ticks in one process-wide clock, so
//! parsed instants are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Errors returned while parsing a deadline from user text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeadlineParseError {
    /// No accepted format matched the input.
    #[error("unrecognised deadline format: '{0}'")]
    Unrecognised(String),

    /// The input parsed to an instant at or before the current time.
    #[error("deadline {0} is in the past")]
    InPast(DateTime<Utc>),
}

/// Accepted formats, in match order. Day-first formats take precedence over
/// ISO dates, matching the chat product this core was written for.
const DATETIME_FORMATS: [&str; 3] = ["%d.%m.%Y %H:%M", "%Y-%m-%d %H:%M", "%d/%m/%Y %H:%M"];
const DATE_FORMATS: [&str; 3] = ["%d.%m.%Y", "%Y-%m-%d", "%d/%m/%Y"];

/// Parses a deadline from user text, rejecting instants at or before `now`.
///
/// # Errors
///
/// Returns [`DeadlineParseError::Unrecognised`] when no format matches and
/// [`DeadlineParseError::InPast`] when the parsed instant is not in the
/// future.
pub fn parse_deadline(text: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, DeadlineParseError> {
    let trimmed = text.trim();
    let parsed = parse_instant(trimmed)
        .ok_or_else(|| DeadlineParseError::Unrecognised(trimmed.to_owned()))?;
    if parsed <= now {
        return Err(DeadlineParseError::InPast(parsed));
    }
    Ok(parsed)
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}
