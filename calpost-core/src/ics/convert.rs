//! Feed entries → events CSV rows.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use chrono_tz::Tz;

use super::parse::{parse_feed, FeedEntry};
use crate::config::ImportConfig;
use crate::error::CalpostResult;
use crate::records::EventRow;

/// Parse a feed and convert it into CSV rows, sorted by date.
pub fn convert_feed(content: &str, import: &ImportConfig) -> CalpostResult<Vec<EventRow>> {
    let tz = import.tz()?;
    let entries = parse_feed(content)?;
    Ok(to_rows(&entries, &import.default_kind, tz))
}

pub fn to_rows(entries: &[FeedEntry], kind: &str, tz: Tz) -> Vec<EventRow> {
    let mut rows: Vec<EventRow> = entries.iter().map(|entry| to_row(entry, kind, tz)).collect();
    rows.sort_by_key(|row| row.date);
    rows
}

fn to_row(entry: &FeedEntry, kind: &str, tz: Tz) -> EventRow {
    let (date, start) = entry.start.local(tz);
    let end = entry
        .end
        .as_ref()
        .and_then(|end| end.local(tz).1)
        .or(start);

    let (repeat_count, days_between) = match entry.rrule.as_deref().and_then(repeat_from_rrule) {
        Some((count, days)) => (count, Some(days)),
        None => (1, None),
    };

    EventRow {
        kind: kind.to_string(),
        name: entry.summary.clone(),
        date,
        repeat_count,
        days_between,
        start_time: start.map(format_time).unwrap_or_default(),
        end_time: end.map(format_time).unwrap_or_default(),
        location: entry.location.clone().unwrap_or_default(),
    }
}

/// "6:00PM"
fn format_time(datetime: NaiveDateTime) -> String {
    datetime.format("%-I:%M%p").to_string()
}

/// Map a fixed-interval RRULE onto `(repeat_count, days_between)`.
///
/// Only daily or weekly rules with a COUNT fit the CSV format; a BYDAY
/// naming more than one day does not.
fn repeat_from_rrule(rrule: &str) -> Option<(u32, i64)> {
    let parts: HashMap<&str, &str> = rrule
        .split(';')
        .filter_map(|part| part.split_once('='))
        .collect();

    if parts
        .iter()
        .any(|(key, value)| key.starts_with("BY") && !(*key == "BYDAY" && !value.contains(',')))
    {
        log::debug!("RRULE '{}' does not fit a fixed interval", rrule);
        return None;
    }

    let count: u32 = parts.get("COUNT")?.parse().ok()?;
    let interval: i64 = match parts.get("INTERVAL") {
        Some(interval) => interval.parse().ok().filter(|i| *i > 0)?,
        None => 1,
    };
    let days = match *parts.get("FREQ")? {
        "DAILY" => interval,
        "WEEKLY" => interval.checked_mul(7)?,
        _ => return None,
    };

    Some((count, days))
}
