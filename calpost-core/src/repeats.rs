//! Repeat detection.
//!
//! The upstream feed only reports a location for the next occurrence of a
//! recurring series. Later occurrences come through with no location and
//! would otherwise be announced as virtual, so they are moved to the future
//! bucket instead. This is a heuristic: a one-off virtual event that happens
//! to share a title with another event is reclassified too.

use std::collections::HashMap;

use crate::event::Event;

/// Mark every location-less event whose title occurs more than once as future.
///
/// Returns the number of events marked.
pub fn detect_repeats(events: &mut [Event]) -> usize {
    let mut instances: HashMap<&str, usize> = HashMap::new();
    for event in events.iter() {
        *instances.entry(event.title.as_str()).or_default() += 1;
    }

    let repeated: Vec<bool> = events
        .iter()
        .map(|event| event.location().is_none() && instances[event.title.as_str()] > 1)
        .collect();

    let mut marked = 0;
    for (event, repeated) in events.iter_mut().zip(repeated) {
        if repeated {
            event.mark_future();
            marked += 1;
        }
    }

    log::debug!("Marked {} repeated events as future", marked);
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(title: &str, day: u32, location: Option<&str>) -> Event {
        Event::new(
            "showcase",
            title,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            "7:00PM",
            "9:00PM",
            location.map(str::to_string),
        )
    }

    #[test]
    fn test_single_locationless_event_stays_virtual() {
        let mut events = vec![event("Dev Night", 1, None)];
        assert_eq!(detect_repeats(&mut events), 0);
        assert!(!events[0].is_future());
        assert!(events[0].is_virtual());
    }

    #[test]
    fn test_repeated_locationless_events_become_future() {
        let mut events = vec![
            event("Dev Night", 1, None),
            event("Dev Night", 15, None),
            event("Dev Night", 29, None),
        ];
        assert_eq!(detect_repeats(&mut events), 3);
        assert!(events.iter().all(Event::is_future));
    }

    #[test]
    fn test_located_instance_of_series_is_kept() {
        let mut events = vec![
            event("Dev Night", 1, Some("Hall")),
            event("Dev Night", 15, None),
            event("Other", 20, None),
        ];
        detect_repeats(&mut events);

        assert!(!events[0].is_future());
        assert!(events[1].is_future());
        assert!(!events[2].is_future());
    }

    #[test]
    fn test_online_sentinel_location_is_not_absent() {
        let mut events = vec![
            event("Dev Night", 1, Some("Online event")),
            event("Dev Night", 15, Some("Online event")),
        ];
        detect_repeats(&mut events);
        assert!(events.iter().all(|e| !e.is_future()));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let mut events = vec![event("Dev Night", 1, None), event("Dev Night", 15, None)];
        detect_repeats(&mut events);
        detect_repeats(&mut events);
        assert!(events.iter().all(Event::is_future));
    }
}
