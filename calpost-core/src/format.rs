//! Single-line rendering of events.
//!
//! A rendered line looks like
//! `:video_game: **Game Jam** • Saturday, June 1st • 6:00PM - 9:00PM`,
//! optionally followed by an emphasized second line (the location).

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::constants::{DEFAULT_EMOJI, DEFAULT_LOCATION_MARKER, DEFAULT_LOCATION_RENAMES};
use crate::event::Event;

/// Kind → emoji code lookup. Unknown kinds are used as the emoji code themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiTable(BTreeMap<String, String>);

impl Default for EmojiTable {
    fn default() -> Self {
        EmojiTable::from_pairs(DEFAULT_EMOJI)
    }
}

impl EmojiTable {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        EmojiTable(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Built-in table with `overrides` layered on top.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut table = EmojiTable::default();
        table
            .0
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        table
    }

    pub fn resolve<'a>(&'a self, kind: &'a str) -> &'a str {
        match self.0.get(kind) {
            Some(code) => code.as_str(),
            // Kinds may already be written as shortcodes, e.g. ":tada:"
            None => kind.trim_matches(':'),
        }
    }
}

/// Long-form → short display names for known venues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRenames(BTreeMap<String, String>);

impl Default for LocationRenames {
    fn default() -> Self {
        LocationRenames(
            DEFAULT_LOCATION_RENAMES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl LocationRenames {
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut renames = LocationRenames::default();
        renames
            .0
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        renames
    }

    pub fn rename<'a>(&'a self, location: &'a str) -> &'a str {
        self.0.get(location).map(String::as_str).unwrap_or(location)
    }
}

/// Lookup tables and markers used when turning events into lines.
#[derive(Debug, Clone)]
pub struct LineFormatter {
    pub emoji: EmojiTable,
    pub locations: LocationRenames,
    /// Emoji code put in front of rendered locations
    pub location_marker: String,
}

impl Default for LineFormatter {
    fn default() -> Self {
        LineFormatter {
            emoji: EmojiTable::default(),
            locations: LocationRenames::default(),
            location_marker: DEFAULT_LOCATION_MARKER.to_string(),
        }
    }
}

/// Everything needed to render one line, already resolved from an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem<'a> {
    pub emoji: &'a str,
    pub title: &'a str,
    pub date: NaiveDate,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub after_line: Option<String>,
}

impl LineItem<'_> {
    pub fn render(&self) -> String {
        line_item(
            self.emoji,
            self.title,
            self.date,
            self.start_time,
            self.end_time,
            self.after_line.as_deref(),
        )
    }
}

impl LineFormatter {
    pub fn line_item<'a>(&'a self, event: &'a Event) -> LineItem<'a> {
        LineItem {
            emoji: self.emoji.resolve(&event.kind),
            title: &event.title,
            date: event.date,
            start_time: &event.start_time,
            end_time: &event.end_time,
            after_line: self.location_line(event),
        }
    }

    pub fn render(&self, event: &Event) -> String {
        self.line_item(event).render()
    }

    /// Location annotation for in-person events.
    ///
    /// Future events get none since the feed only reports the location of
    /// the next occurrence; virtual events get none at all.
    fn location_line(&self, event: &Event) -> Option<String> {
        if event.is_future() || event.is_virtual() {
            return None;
        }

        let location = self.locations.rename(event.location()?);
        if location.is_empty() {
            return None;
        }
        if location.contains(self.location_marker.as_str()) {
            Some(location.to_string())
        } else {
            Some(format!(":{}: {}", self.location_marker, location))
        }
    }
}

/// Render one announcement line, with `after_line` emphasized on its own line.
pub fn line_item(
    emoji: &str,
    title: &str,
    date: NaiveDate,
    start_time: &str,
    end_time: &str,
    after_line: Option<&str>,
) -> String {
    let main = format!(
        ":{}: **{}** • {} • {} - {}",
        emoji,
        title,
        format_date(date),
        start_time,
        end_time
    );

    match after_line {
        Some(after) => format!("{}\n*{}*", main, after),
        None => main,
    }
}

/// "Tuesday, June 4th"
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%A, %B"), ordinal(date.day()))
}

pub fn ordinal(day: u32) -> String {
    format!("{}{}", day, ordinal_suffix(day))
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&(day % 100)) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
