//! Calendar feed parsing using the icalendar crate's parser.

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use icalendar::{
    parser::{read_calendar, unfold, Component},
    CalendarDateTime, DatePerhapsTime,
};

use crate::error::{CalpostError, CalpostResult};

/// Start or end of a feed entry, as written in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedTime {
    Date(NaiveDate),
    DateTimeUtc(chrono::DateTime<chrono::Utc>),
    DateTimeFloating(NaiveDateTime),
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl FeedTime {
    /// Wall-clock date and time in `tz`. All-day entries have no time.
    ///
    /// Zoned times keep their own wall clock; floating times are taken as-is.
    pub fn local(&self, tz: Tz) -> (NaiveDate, Option<NaiveDateTime>) {
        let datetime = match self {
            FeedTime::Date(d) => return (*d, None),
            FeedTime::DateTimeUtc(dt) => dt.with_timezone(&tz).naive_local(),
            FeedTime::DateTimeFloating(dt) => *dt,
            FeedTime::DateTimeZoned { datetime, .. } => *datetime,
        };
        (datetime.date(), Some(datetime))
    }
}

impl From<DatePerhapsTime> for FeedTime {
    fn from(dpt: DatePerhapsTime) -> Self {
        match dpt {
            DatePerhapsTime::Date(d) => FeedTime::Date(d),
            DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
                CalendarDateTime::Utc(dt) => FeedTime::DateTimeUtc(dt),
                CalendarDateTime::Floating(naive) => FeedTime::DateTimeFloating(naive),
                CalendarDateTime::WithTimezone { date_time, tzid } => FeedTime::DateTimeZoned {
                    datetime: date_time,
                    tzid,
                },
            },
        }
    }
}

/// One VEVENT of a calendar feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub summary: String,
    pub start: FeedTime,
    pub end: Option<FeedTime>,
    pub location: Option<String>,
    pub rrule: Option<String>,
}

/// Parse every usable VEVENT of a feed, in feed order.
///
/// Cancelled events and events without a start are skipped.
pub fn parse_feed(content: &str) -> CalpostResult<Vec<FeedEntry>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| CalpostError::IcsParse(e.to_string()))?;

    let entries: Vec<FeedEntry> = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(parse_entry)
        .collect();

    log::debug!("Parsed {} feed entries", entries.len());
    Ok(entries)
}

fn parse_entry(vevent: &Component) -> Option<FeedEntry> {
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "(No title)".to_string());

    if vevent
        .find_prop("STATUS")
        .is_some_and(|p| p.val.as_ref() == "CANCELLED")
    {
        log::debug!("Skipping cancelled event '{}'", summary);
        return None;
    }

    let Some(start) = vevent
        .find_prop("DTSTART")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
    else {
        log::warn!("Skipping event '{}' without a usable DTSTART", summary);
        return None;
    };

    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(FeedTime::from);

    let location = vevent
        .find_prop("LOCATION")
        .map(|p| p.val.to_string())
        .filter(|loc| !loc.trim().is_empty());

    let rrule = vevent.find_prop("RRULE").map(|p| p.val.to_string());

    Some(FeedEntry {
        summary,
        start: FeedTime::from(start),
        end,
        location,
        rrule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn feed(events: &str) -> String {
        format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:TEST\r\n{}END:VCALENDAR\r\n",
            events
        )
    }

    #[test]
    fn test_parse_utc_event_with_escaped_location() {
        let ics = feed(
            "BEGIN:VEVENT\r\n\
UID:jam-1\r\n\
SUMMARY:Game Jam\r\n\
DTSTART:20240601T220000Z\r\n\
DTEND:20240602T010000Z\r\n\
LOCATION:Buffalo Game Space (2495 Main Street\\, Suite #454\\, Buffalo\\, NY 14214)\r\n\
END:VEVENT\r\n",
        );

        let entries = parse_feed(&ics).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.summary, "Game Jam");
        assert_eq!(
            entry.start,
            FeedTime::DateTimeUtc(Utc.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap())
        );
        assert_eq!(
            entry.location.as_deref(),
            Some("Buffalo Game Space (2495 Main Street, Suite #454, Buffalo, NY 14214)")
        );
        assert_eq!(entry.rrule, None);
    }

    #[test]
    fn test_escaped_backslash_survives() {
        let ics = feed(
            "BEGIN:VEVENT\r\n\
UID:room\r\n\
SUMMARY:Dev Night\r\n\
DTSTART:20240601T220000Z\r\n\
LOCATION:Room \\\\1\\, A\r\n\
END:VEVENT\r\n",
        );

        let entries = parse_feed(&ics).unwrap();
        assert_eq!(entries[0].summary, "Dev Night");
        assert_eq!(entries[0].location.as_deref(), Some("Room \\1, A"));
    }

    #[test]
    fn test_parse_zoned_and_all_day_events() {
        let ics = feed(
            "BEGIN:VEVENT\r\n\
UID:a\r\n\
SUMMARY:Zoned\r\n\
DTSTART;TZID=America/New_York:20240601T180000\r\n\
DTEND;TZID=America/New_York:20240601T210000\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:b\r\n\
SUMMARY:All Day\r\n\
DTSTART;VALUE=DATE:20240602\r\n\
END:VEVENT\r\n",
        );

        let entries = parse_feed(&ics).unwrap();
        assert_eq!(entries.len(), 2);

        match &entries[0].start {
            FeedTime::DateTimeZoned { datetime, tzid } => {
                assert_eq!(tzid, "America/New_York");
                assert_eq!(datetime.time(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
            }
            other => panic!("Expected DateTimeZoned, got {:?}", other),
        }
        assert_eq!(
            entries[1].start,
            FeedTime::Date(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())
        );
        assert_eq!(entries[1].end, None);
    }

    #[test]
    fn test_cancelled_and_startless_events_are_skipped() {
        let ics = feed(
            "BEGIN:VEVENT\r\n\
UID:a\r\n\
SUMMARY:Cancelled\r\n\
STATUS:CANCELLED\r\n\
DTSTART:20240601T220000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:b\r\n\
SUMMARY:No Start\r\n\
END:VEVENT\r\n",
        );

        assert!(parse_feed(&ics).unwrap().is_empty());
    }

    #[test]
    fn test_rrule_is_kept() {
        let ics = feed(
            "BEGIN:VEVENT\r\n\
UID:a\r\n\
SUMMARY:Dev Night\r\n\
DTSTART:20240601T220000Z\r\n\
RRULE:FREQ=WEEKLY;INTERVAL=2;COUNT=3\r\n\
END:VEVENT\r\n",
        );

        let entries = parse_feed(&ics).unwrap();
        assert_eq!(entries[0].rrule.as_deref(), Some("FREQ=WEEKLY;INTERVAL=2;COUNT=3"));
    }

    #[test]
    fn test_local_time_conversion() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let utc = FeedTime::DateTimeUtc(Utc.with_ymd_and_hms(2024, 6, 2, 1, 0, 0).unwrap());
        let (date, time) = utc.local(tz);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(time.unwrap().time(), NaiveTime::from_hms_opt(21, 0, 0).unwrap());
    }
}
