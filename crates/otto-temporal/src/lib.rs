//! Natural-language date and time resolution for scheduling requests

mod date;
mod error;
mod event;
mod time;

pub use date::{classify, resolve_date, try_resolve_date, DateContext, DateToken, YearPolicy};
pub use error::TemporalError;
pub use event::EventRequest;
pub use time::{resolve_time, try_resolve_time};

/// Returns true when `value` is a canonical `YYYY-MM-DD` date.
///
/// Resolution falls back to the original phrase when nothing matches, so this
/// is how callers tell a resolved value from a passthrough.
pub fn is_iso_date(value: &str) -> bool {
    value.len() == 10 && chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Returns true when `value` is a canonical zero-padded `HH:MM` time.
pub fn is_iso_time(value: &str) -> bool {
    value.len() == 5 && chrono::NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}
