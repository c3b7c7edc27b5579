//! The events CSV format.
//!
//! Header row first, then one row per event series:
//! `kind,name,date,repeat_count,days_between,start_time,end_time,location`

mod parse;
mod write;

use chrono::NaiveDate;
use serde::Serialize;

pub use parse::{parse_events, parse_events_str};
pub use write::{write_rows, write_rows_string};

/// Column names, in the order they are written.
pub const HEADER: [&str; 8] = [
    "kind",
    "name",
    "date",
    "repeat_count",
    "days_between",
    "start_time",
    "end_time",
    "location",
];

/// One row of the events CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRow {
    pub kind: String,
    pub name: String,
    pub date: NaiveDate,
    pub repeat_count: u32,
    /// Empty unless `repeat_count` is not 1
    pub days_between: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    /// Empty for events without a location
    pub location: String,
}
