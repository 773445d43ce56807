//! Clock-time phrase resolution ("3pm", "9:15am")

use chrono::NaiveTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

type TimeStrategy = fn(&str, Meridiem) -> Option<(u32, u32)>;

/// Hour-only is tried before hour:minute.
const TIME_STRATEGIES: &[(&str, TimeStrategy)] = &[
    ("hour_meridiem", hour_meridiem),
    ("hour_minute_meridiem", hour_minute_meridiem),
];

fn split_meridiem(phrase: &str) -> Option<(&str, Meridiem)> {
    if let Some(rest) = phrase.strip_suffix("am") {
        Some((rest, Meridiem::Am))
    } else {
        phrase.strip_suffix("pm").map(|rest| (rest, Meridiem::Pm))
    }
}

/// Parse a 1-2 digit number in `range`
fn small_number(digits: &str, range: std::ops::RangeInclusive<u32>) -> Option<u32> {
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    range.contains(&n).then_some(n)
}

fn to_24_hour(hour: u32, meridiem: Meridiem) -> u32 {
    match meridiem {
        Meridiem::Am => hour % 12,
        Meridiem::Pm => hour % 12 + 12,
    }
}

fn hour_meridiem(body: &str, meridiem: Meridiem) -> Option<(u32, u32)> {
    let hour = small_number(body, 1..=12)?;
    Some((to_24_hour(hour, meridiem), 0))
}

fn hour_minute_meridiem(body: &str, meridiem: Meridiem) -> Option<(u32, u32)> {
    let (hour, minute) = body.split_once(':')?;
    let hour = small_number(hour, 1..=12)?;
    let minute = small_number(minute, 0..=59)?;
    Some((to_24_hour(hour, meridiem), minute))
}

/// Resolve a 12-hour phrase to a time of day, or `None` if it isn't one.
///
/// Bare numbers like "5" carry no meridiem and are never guessed at.
pub fn try_resolve_time(input: &str) -> Option<NaiveTime> {
    let phrase: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if !phrase.contains("am") && !phrase.contains("pm") {
        return None;
    }

    let (body, meridiem) = split_meridiem(&phrase)?;
    TIME_STRATEGIES.iter().find_map(|(name, strategy)| {
        let (hour, minute) = strategy(body, meridiem)?;
        tracing::trace!(strategy = *name, hour, minute, "time phrase matched");
        NaiveTime::from_hms_opt(hour, minute, 0)
    })
}

/// Resolve a phrase to zero-padded 24-hour `HH:MM`, returning the input
/// unchanged when it can't be parsed
pub fn resolve_time(input: &str) -> String {
    match try_resolve_time(input) {
        Some(time) => time.format("%H:%M").to_string(),
        None => {
            tracing::debug!(phrase = input, "time phrase not recognized, passing through");
            input.to_string()
        }
    }
}
