//! Human-readable formatting for pickup point schedules.
//!
//! The backend listing carries open hours as structured restrictions
//! (weekday set plus a time window); points display them as one formatted
//! string, e.g. `"Mon-Fri 09:00-18:00; Sat 10:00-16:00"`.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// One structured open-hours restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenHours {
    /// ISO weekday numbers, 1 = Monday through 7 = Sunday.
    pub days: Vec<u8>,
    /// Opening time, `"HH:MM"`.
    pub time_from: String,
    /// Closing time, `"HH:MM"`.
    pub time_to: String,
}

/// Formats restrictions as a single display string.
///
/// Consecutive weekday runs collapse into ranges; restrictions are joined
/// with `"; "`. Restrictions without any valid day are skipped, and an
/// empty input yields an empty string rather than an error.
#[must_use]
pub fn format_schedule(restrictions: &[OpenHours]) -> String {
    restrictions
        .iter()
        .filter_map(format_restriction)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Formats exception dates as `"DD.MM.YYYY"` joined with `", "`.
#[must_use]
pub fn format_dayoffs(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|date| date.format("%d.%m.%Y").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_restriction(hours: &OpenHours) -> Option<String> {
    let mut days: Vec<Weekday> = hours
        .days
        .iter()
        .copied()
        .filter_map(weekday_from_iso)
        .collect();
    days.sort_by_key(Weekday::number_from_monday);
    days.dedup();
    if days.is_empty() {
        return None;
    }

    // Collapse consecutive weekdays into (start, end) runs.
    let mut runs: Vec<(Weekday, Weekday)> = Vec::new();
    for day in days {
        match runs.last_mut() {
            Some((_, end)) if end.number_from_monday() + 1 == day.number_from_monday() => {
                *end = day;
            }
            _ => runs.push((day, day)),
        }
    }

    let day_part = runs
        .iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{start}-{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    Some(format!(
        "{day_part} {}-{}",
        format_time(&hours.time_from),
        format_time(&hours.time_to)
    ))
}

/// Reformats a time through `NaiveTime` so `"9:00"` becomes `"09:00"`.
/// Unparseable input is kept as is.
fn format_time(raw: &str) -> String {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_else(|_| raw.to_owned())
}

fn weekday_from_iso(n: u8) -> Option<Weekday> {
    match n {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}
