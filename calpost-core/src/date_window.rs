//! Announcement window for filtering events.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Which runs the window is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    /// Interactive and automated runs
    #[default]
    Always,
    /// Automated runs only
    Automated,
}

impl WindowMode {
    pub fn applies(self, automated: bool) -> bool {
        match self {
            WindowMode::Always => true,
            WindowMode::Automated => automated,
        }
    }
}

/// Events up to and including `until` are announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub until: NaiveDate,
}

impl DateWindow {
    /// Window ending `weeks` weeks after `today`.
    pub fn weeks_from(today: NaiveDate, weeks: i64) -> Self {
        let until = Duration::try_weeks(weeks)
            .and_then(|span| today.checked_add_signed(span))
            .unwrap_or(NaiveDate::MAX);
        DateWindow { until }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date <= self.until
    }

    /// Drop events past the end of the window, keeping order.
    pub fn filter(&self, events: Vec<Event>) -> Vec<Event> {
        let before = events.len();
        let kept: Vec<Event> = events
            .into_iter()
            .filter(|event| self.contains(event.date))
            .collect();

        log::debug!(
            "Window until {} kept {} of {} events",
            self.until,
            kept.len(),
            before
        );
        kept
    }
}
