//! Date phrase resolution

use chrono::{Datelike, Days, Local, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Year assumed for phrases like "Feb 15" that carry no year of their own.
///
/// Month-day phrases never roll forward to the next future occurrence:
/// "January 5" resolved in December still lands in the assumed year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearPolicy {
    /// Use the year of the reference date
    #[default]
    Reference,
    /// Pin a specific year
    Fixed(i32),
}

/// Reference point for resolving relative and year-less phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateContext {
    pub reference: NaiveDate,
    pub year_policy: YearPolicy,
}

impl DateContext {
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            reference,
            year_policy: YearPolicy::Reference,
        }
    }

    /// Context anchored on the local calendar date
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year_policy = YearPolicy::Fixed(year);
        self
    }

    pub fn assumed_year(&self) -> i32 {
        match self.year_policy {
            YearPolicy::Reference => self.reference.year(),
            YearPolicy::Fixed(year) => year,
        }
    }
}

/// Classification of a date phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    /// "today", "tomorrow", "next week"
    Relative { offset_days: u64 },
    /// A month and day, year left to the context
    MonthDay { month: u32, day: u32 },
    Unparsable,
}

type DateStrategy = fn(&str) -> Option<DateToken>;

/// Tried in order; the first match wins.
const DATE_STRATEGIES: &[(&str, DateStrategy)] = &[
    ("relative_keyword", relative_keyword),
    ("long_month_day", long_month_day),
    ("short_month_day", short_month_day),
];

fn ordinal_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d+)(?:st|nd|rd|th)\b").expect("ordinal pattern is valid")
    })
}

fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn relative_keyword(phrase: &str) -> Option<DateToken> {
    let offset_days = match phrase {
        "today" => 0,
        "tomorrow" => 1,
        "next week" => 7,
        _ => return None,
    };
    Some(DateToken::Relative { offset_days })
}

fn long_month_day(phrase: &str) -> Option<DateToken> {
    month_day(phrase, |name| name)
}

fn short_month_day(phrase: &str) -> Option<DateToken> {
    month_day(phrase, |name| &name[..3])
}

fn month_day(phrase: &str, month_form: fn(&'static str) -> &'static str) -> Option<DateToken> {
    let cleaned = ordinal_suffix().replace_all(phrase, "$1");
    let mut parts = cleaned.split(' ');
    let (month_word, day_word) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month = MONTH_NAMES
        .iter()
        .position(|name| month_form(*name) == month_word)? as u32
        + 1;

    if day_word.is_empty()
        || day_word.len() > 2
        || !day_word.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let day: u32 = day_word.parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }

    Some(DateToken::MonthDay { month, day })
}

/// Classify a raw phrase without resolving it against a reference date
pub fn classify(input: &str) -> DateToken {
    let phrase = normalize(input);
    DATE_STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            let token = strategy(&phrase)?;
            tracing::trace!(strategy = *name, ?token, "date phrase matched");
            Some(token)
        })
        .unwrap_or(DateToken::Unparsable)
}

/// Resolve a phrase to a calendar date, or `None` if no strategy applies
pub fn try_resolve_date(input: &str, ctx: &DateContext) -> Option<NaiveDate> {
    match classify(input) {
        DateToken::Relative { offset_days } => {
            ctx.reference.checked_add_days(Days::new(offset_days))
        }
        DateToken::MonthDay { month, day } => {
            NaiveDate::from_ymd_opt(ctx.assumed_year(), month, day)
        }
        DateToken::Unparsable => None,
    }
}

/// Resolve a phrase to `YYYY-MM-DD`, returning the input unchanged on failure
pub fn resolve_date(input: &str, ctx: &DateContext) -> String {
    match try_resolve_date(input, ctx) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => {
            tracing::debug!(phrase = input, "date phrase not recognized, passing through");
            input.to_string()
        }
    }
}
