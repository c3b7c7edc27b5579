//! One announcement run: events in, three rendered messages out.
//!
//! The steps are load → window → repeat detection → sort → compose. Nothing
//! here looks at the terminal or the clock; callers pass the run mode and
//! today's date in.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::compose::Messages;
use crate::config::CalpostConfig;
use crate::date_window::DateWindow;
use crate::error::{CalpostError, CalpostResult};
use crate::event::Event;
use crate::records::parse_events;
use crate::repeats::detect_repeats;

/// How the run was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Rows were piped in; results go to payload files
    Automated,
    /// Run by hand; results are printed for review
    Interactive,
}

impl RunMode {
    pub fn is_automated(self) -> bool {
        self == RunMode::Automated
    }
}

/// Where event rows come from.
pub enum InputSource<R> {
    Piped(R),
    File(PathBuf),
}

/// Read the preface file, falling back to `default` if it can't be read.
pub fn load_preface(path: &Path, default: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(preface) => preface,
        Err(e) => {
            log::debug!(
                "No preface at {} ({}), using default",
                path.display(),
                e
            );
            default.to_string()
        }
    }
}

/// Parse all event rows from `source`.
pub fn load_events<R: Read>(
    source: InputSource<R>,
    online_location: &str,
) -> CalpostResult<Vec<Event>> {
    match source {
        InputSource::Piped(reader) => {
            log::info!("Reading events from stdin");
            parse_events(reader, online_location)
        }
        InputSource::File(path) => {
            if !path.exists() {
                return Err(CalpostError::MissingInputSource(path));
            }
            log::info!("Reading events from {}", path.display());
            let contents = std::fs::read(&path)
                .map_err(|source| CalpostError::InputRead { path, source })?;
            parse_events(contents.as_slice(), online_location)
        }
    }
}

/// Window, flag repeats and sort the loaded events.
///
/// Repeat detection only sees events inside the window, and the sort keeps
/// input order for events on the same day.
pub fn prepare_events(mut events: Vec<Event>, window: Option<DateWindow>) -> Vec<Event> {
    if let Some(window) = window {
        events = window.filter(events);
    }
    detect_repeats(&mut events);
    events.sort_by_key(|event| event.date);
    events
}

/// Run everything after loading: window, repeats, sort and compose.
pub fn render(
    config: &CalpostConfig,
    events: Vec<Event>,
    preface: &str,
    mode: RunMode,
    today: NaiveDate,
) -> Messages {
    let window = config
        .window_mode
        .applies(mode.is_automated())
        .then(|| DateWindow::weeks_from(today, config.window_weeks));

    let events = prepare_events(events, window);
    log::info!("Composing messages for {} events", events.len());

    config.composer().compose(&events, preface)
}
