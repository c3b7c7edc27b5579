//! Events CSV parsing.
//!
//! Columns are matched by header name, so their order does not matter.
//! Every row expands into `repeat_count` dated occurrences.

use std::io::Read;

use chrono::{Duration, NaiveDate};

use crate::constants::MAX_REPEAT_COUNT;
use crate::error::{CalpostError, CalpostResult};
use crate::event::Event;

/// Column positions resolved from the header row.
struct Columns {
    kind: usize,
    name: usize,
    date: usize,
    start_time: usize,
    end_time: usize,
    repeat_count: Option<usize>,
    days_between: Option<usize>,
    location: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> CalpostResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
        };
        let require =
            |name: &str| find(name).ok_or_else(|| CalpostError::MissingColumn(name.to_string()));

        Ok(Columns {
            kind: require("kind")?,
            name: require("name")?,
            date: require("date")?,
            start_time: require("start_time")?,
            end_time: require("end_time")?,
            repeat_count: find("repeat_count"),
            days_between: find("days_between"),
            location: find("location"),
        })
    }
}

/// Parse events CSV text into dated occurrences.
pub fn parse_events_str(input: &str, online_location: &str) -> CalpostResult<Vec<Event>> {
    parse_events(input.as_bytes(), online_location)
}

/// Parse events CSV from a reader into dated occurrences, in row order.
///
/// `online_location` is the location string that marks an event as virtual.
pub fn parse_events(input: impl Read, online_location: &str) -> CalpostResult<Vec<Event>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let columns = Columns::from_headers(reader.headers()?)?;

    let mut events = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 1;
        let field = |idx: usize| record.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let title = field(columns.name);
        if title.trim().is_empty() {
            return Err(CalpostError::malformed(row, "name", "event name is empty"));
        }

        let date = parse_date(row, field(columns.date))?;
        let repeat_count = parse_repeat_count(row, optional(columns.repeat_count))?;
        // days_between only matters for series; a single event ignores whatever is there
        let days_between = if repeat_count == 1 {
            0
        } else {
            parse_days_between(row, optional(columns.days_between))?
        };
        let location = Some(optional(columns.location).trim())
            .filter(|loc| !loc.is_empty())
            .map(str::to_string);

        for n in 0..repeat_count {
            let occurrence = days_between
                .checked_mul(i64::from(n))
                .and_then(Duration::try_days)
                .and_then(|offset| date.checked_add_signed(offset))
                .ok_or_else(|| {
                    CalpostError::malformed(row, "days_between", "repeat runs past the calendar")
                })?;

            events.push(Event::with_online_location(
                field(columns.kind),
                title,
                occurrence,
                field(columns.start_time),
                field(columns.end_time),
                location.clone(),
                online_location,
            ));
        }
    }

    log::debug!("Parsed {} event occurrences", events.len());
    Ok(events)
}

fn parse_date(row: usize, raw: &str) -> CalpostResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CalpostError::malformed(row, "date", format!("'{}' is not a YYYY-MM-DD date", raw))
    })
}

fn parse_repeat_count(row: usize, raw: &str) -> CalpostResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(1);
    }
    let count: u32 = raw.parse().map_err(|_| {
        CalpostError::malformed(
            row,
            "repeat_count",
            format!("'{}' is not a non-negative integer", raw),
        )
    })?;
    if count > MAX_REPEAT_COUNT {
        return Err(CalpostError::malformed(
            row,
            "repeat_count",
            format!("{} is more than the limit of {}", count, MAX_REPEAT_COUNT),
        ));
    }
    Ok(count)
}

fn parse_days_between(row: usize, raw: &str) -> CalpostResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CalpostError::malformed(
            row,
            "days_between",
            "required when repeat_count is not 1",
        ));
    }
    raw.parse().map_err(|_| {
        CalpostError::malformed(row, "days_between", format!("'{}' is not an integer", raw))
    })
}
