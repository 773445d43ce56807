pub mod check;
pub mod compress;
pub mod console;
pub mod date;
pub mod schedule;
pub mod stats;
pub mod time;
pub mod version;

use crate::config::AppConfig;
use anyhow::Context;
use chrono::NaiveDate;
use otto_temporal::DateContext;

/// Reference date and year policy from CLI flags, falling back to config
pub(crate) fn date_context(
    today: Option<&str>,
    year: Option<i32>,
    config: &AppConfig,
) -> anyhow::Result<DateContext> {
    let mut ctx = match today {
        Some(raw) => DateContext::new(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("invalid --today {:?}, expected YYYY-MM-DD", raw))?,
        ),
        None => DateContext::today(),
    };
    if let Some(year) = year.or(config.assumed_year) {
        ctx = ctx.with_year(year);
    }
    Ok(ctx)
}
