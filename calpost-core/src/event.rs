//! One dated occurrence of an announced event.
//!
//! Events are created by the CSV parser, have their `future` flag set by the
//! repeat detector, and are read-only from then on.

use chrono::NaiveDate;

use crate::constants::ONLINE_EVENT_LOCATION;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Category tag, looked up in the emoji table when rendering
    pub kind: String,
    pub title: String,
    pub date: NaiveDate,
    /// Display strings, passed through verbatim
    pub start_time: String,
    pub end_time: String,

    location: Option<String>,
    is_virtual: bool,
    future: bool,
}

/// Output partition an event is announced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Virtual,
    InPerson,
    Future,
}

impl Event {
    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        location: Option<String>,
    ) -> Self {
        Self::with_online_location(
            kind,
            title,
            date,
            start_time,
            end_time,
            location,
            ONLINE_EVENT_LOCATION,
        )
    }

    /// Like [`Event::new`], with a custom location string that marks an event as virtual.
    pub fn with_online_location(
        kind: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        location: Option<String>,
        online_location: &str,
    ) -> Self {
        let is_virtual = location.as_deref().is_none_or(|loc| loc == online_location);

        Event {
            kind: kind.into(),
            title: title.into(),
            date,
            start_time: start_time.into(),
            end_time: end_time.into(),
            location,
            is_virtual,
            future: false,
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    pub fn is_future(&self) -> bool {
        self.future
    }

    /// Flag this occurrence as a suspect repeat. There is no way back.
    pub(crate) fn mark_future(&mut self) {
        self.future = true;
    }

    pub fn bucket(&self) -> Bucket {
        if self.future {
            Bucket::Future
        } else if self.is_virtual {
            Bucket::Virtual
        } else {
            Bucket::InPerson
        }
    }
}
