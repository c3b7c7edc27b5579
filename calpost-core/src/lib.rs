//! Core of calpost: turns event spreadsheets into chat announcements.
//!
//! - `records` parses the events CSV into dated [`Event`]s (and writes it back)
//! - `repeats` flags suspect repeats of a series as future events
//! - `format` and `compose` render events into the three bucket messages
//! - `pipeline` strings the steps together for one run
//! - `ics` converts calendar feeds into events CSV rows

pub mod compose;
pub mod config;
pub mod constants;
pub mod date_window;
pub mod error;
pub mod event;
pub mod format;
pub mod ics;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod repeats;

pub use compose::{Composer, Messages, Templates};
pub use config::CalpostConfig;
pub use error::{CalpostError, CalpostResult};
pub use event::{Bucket, Event};
