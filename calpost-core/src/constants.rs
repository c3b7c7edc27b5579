//! Default values shared across calpost.

/// How far ahead of today events are announced.
pub const DEFAULT_WINDOW_WEEKS: i64 = 8;

/// Most occurrences a single CSV row may expand into.
pub const MAX_REPEAT_COUNT: u32 = 1000;

/// Location the feed reports for events with no physical venue.
pub const ONLINE_EVENT_LOCATION: &str = "Online event";

/// Emoji code prefixed to rendered locations.
pub const DEFAULT_LOCATION_MARKER: &str = "pushpin";

/// Kind assigned to events imported from a calendar feed.
pub const DEFAULT_IMPORT_KIND: &str = "calendar_spiral";

pub const DEFAULT_IMPORT_TIMEZONE: &str = "America/New_York";

pub const DEFAULT_EVENTS_PATH: &str = "events.csv";
pub const DEFAULT_PREFACE_PATH: &str = "preface.txt";

pub const DEFAULT_VIRTUAL_OUTPUT: &str = "virtual.json";
pub const DEFAULT_IN_PERSON_OUTPUT: &str = "in_person.json";
pub const DEFAULT_FUTURE_OUTPUT: &str = "future.json";

/// Placeholder replaced by the rendered event block in message templates.
pub const EVENTS_PLACEHOLDER: &str = "{events}";

/// Placeholder replaced by the preface text in message templates.
pub const PREFACE_PLACEHOLDER: &str = "{preface}";

pub const DEFAULT_VIRTUAL_TEMPLATE: &str = "\
**__*Upcoming Virtual Events*__**

{events}

Links for joining will be posted near the time of the event. Keep a lookout in #general!";

pub const DEFAULT_IN_PERSON_TEMPLATE: &str = "\
***__Upcoming In-Person Events__***

{events}

:people_holding_hands: Vaccination is required to attend any in person event unless otherwise stated.";

pub const DEFAULT_FUTURE_TEMPLATE: &str = "\
***__Future Events__***

{events}

RSVP on meetup!
<https://www.meetup.com/BuffaloGameSpace/>";

/// Built-in kind → emoji code table.
pub const DEFAULT_EMOJI: &[(&str, &str)] = &[
    ("showcase", "night_with_stars"),
    ("jam", "video_game"),
    ("arcade", "joystick"),
    ("project", "tools"),
    ("workshop", "book"),
    ("santa", "santa"),
];

/// Built-in long-form → short location names.
pub const DEFAULT_LOCATION_RENAMES: &[(&str, &str)] = &[(
    "Buffalo Game Space (2495 Main Street, Suite #454, Buffalo, NY 14214)",
    "BGS, 2495 Main St., Suite #454",
)];
