//! Message composition.
//!
//! Events are split into the virtual, in-person and future buckets, each
//! bucket is rendered as a block quote, and the blocks are dropped into their
//! message templates.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FUTURE_TEMPLATE, DEFAULT_IN_PERSON_TEMPLATE, DEFAULT_VIRTUAL_TEMPLATE,
    EVENTS_PLACEHOLDER, PREFACE_PLACEHOLDER,
};
use crate::event::{Bucket, Event};
use crate::format::LineFormatter;

const QUOTE_PREFIX: &str = "> ";

/// One message template per bucket. `{events}` is replaced by the rendered
/// block, `{preface}` by the preface text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    #[serde(rename = "virtual")]
    pub virtual_events: String,
    pub in_person: String,
    pub future: String,
}

impl Default for Templates {
    fn default() -> Self {
        Templates {
            virtual_events: DEFAULT_VIRTUAL_TEMPLATE.to_string(),
            in_person: DEFAULT_IN_PERSON_TEMPLATE.to_string(),
            future: DEFAULT_FUTURE_TEMPLATE.to_string(),
        }
    }
}

impl Templates {
    pub fn for_bucket(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Virtual => &self.virtual_events,
            Bucket::InPerson => &self.in_person,
            Bucket::Future => &self.future,
        }
    }
}

/// The three rendered messages of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub virtual_events: String,
    pub in_person: String,
    pub future: String,
}

impl Messages {
    /// Messages in posting order: virtual, in-person, future.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &str)> {
        [
            (Bucket::Virtual, self.virtual_events.as_str()),
            (Bucket::InPerson, self.in_person.as_str()),
            (Bucket::Future, self.future.as_str()),
        ]
        .into_iter()
    }
}

/// Events of one run, split by bucket. Each bucket is sorted by date,
/// keeping input order for events on the same day.
#[derive(Debug, Clone, Default)]
pub struct Buckets<'a> {
    pub virtual_events: Vec<&'a Event>,
    pub in_person: Vec<&'a Event>,
    pub future: Vec<&'a Event>,
}

impl<'a> Buckets<'a> {
    pub fn partition(events: &'a [Event]) -> Self {
        let mut buckets = Buckets::default();
        for event in events {
            match event.bucket() {
                Bucket::Virtual => buckets.virtual_events.push(event),
                Bucket::InPerson => buckets.in_person.push(event),
                Bucket::Future => buckets.future.push(event),
            }
        }

        buckets.virtual_events.sort_by_key(|e| e.date);
        buckets.in_person.sort_by_key(|e| e.date);
        buckets.future.sort_by_key(|e| e.date);
        buckets
    }

    pub fn get(&self, bucket: Bucket) -> &[&'a Event] {
        match bucket {
            Bucket::Virtual => &self.virtual_events,
            Bucket::InPerson => &self.in_person,
            Bucket::Future => &self.future,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub formatter: LineFormatter,
    pub templates: Templates,
}

impl Composer {
    pub fn new(formatter: LineFormatter, templates: Templates) -> Self {
        Composer {
            formatter,
            templates,
        }
    }

    pub fn compose(&self, events: &[Event], preface: &str) -> Messages {
        let buckets = Buckets::partition(events);
        let render = |bucket| self.render_bucket(&buckets, bucket, preface);

        Messages {
            virtual_events: render(Bucket::Virtual),
            in_person: render(Bucket::InPerson),
            future: render(Bucket::Future),
        }
    }

    fn render_bucket(&self, buckets: &Buckets<'_>, bucket: Bucket, preface: &str) -> String {
        let items: Vec<String> = buckets
            .get(bucket)
            .iter()
            .map(|event| self.formatter.render(event))
            .collect();

        fill_template(self.templates.for_bucket(bucket), &quote_block(&items), preface)
    }
}

/// Join rendered items into one chat block quote.
///
/// Every line is quoted. Multi-line items are followed by a quoted blank line
/// so they stay visually apart; a trailing one is dropped.
pub fn quote_block<S: AsRef<str>>(items: &[S]) -> String {
    let joined = items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            if item.contains('\n') {
                format!("{}\n", item)
            } else {
                item.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let joined = joined.trim();
    if joined.is_empty() {
        return String::new();
    }

    joined
        .lines()
        .map(|line| format!("{}{}", QUOTE_PREFIX, line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Substitute the block and preface into a template.
///
/// Placeholders are substituted in one pass, so placeholder text inside the
/// preface or the block is left as written.
pub fn fill_template(template: &str, block: &str, preface: &str) -> String {
    let mut filled = String::with_capacity(template.len() + block.len() + preface.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        filled.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(EVENTS_PLACEHOLDER) {
            filled.push_str(block.trim());
            rest = after;
        } else if let Some(after) = tail.strip_prefix(PREFACE_PLACEHOLDER) {
            filled.push_str(preface.trim());
            rest = after;
        } else {
            filled.push('{');
            rest = &tail[1..];
        }
    }
    filled.push_str(rest);

    filled.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(title: &str, day: u32, location: Option<&str>) -> Event {
        Event::new(
            "jam",
            title,
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            "6:00PM",
            "9:00PM",
            location.map(str::to_string),
        )
    }

    fn plain_templates() -> Templates {
        Templates {
            virtual_events: "V\n{events}".to_string(),
            in_person: "I\n{events}".to_string(),
            future: "F\n{events}".to_string(),
        }
    }

    #[test]
    fn test_quote_single_line_item() {
        assert_eq!(quote_block(&["one line"]), "> one line");
    }

    #[test]
    fn test_quote_single_line_items_have_no_blank_lines() {
        assert_eq!(quote_block(&["a", "b", "c"]), "> a\n> b\n> c");
    }

    #[test]
    fn test_quote_multi_line_items_are_separated() {
        let block = quote_block(&["a\n*here*", "b\n*there*", "c"]);
        assert_eq!(block, "> a\n> *here*\n> \n> b\n> *there*\n> \n> c");
    }

    #[test]
    fn test_quote_trailing_separator_is_dropped() {
        assert_eq!(quote_block(&["a", "b\n*there*"]), "> a\n> b\n> *there*");
    }

    #[test]
    fn test_quote_empty() {
        assert_eq!(quote_block::<&str>(&[]), "");
    }

    #[test]
    fn test_fill_template_trims() {
        let filled = fill_template("\n  Header\n\n{events}\n\nFooter\n", "  > a  \n", "");
        assert_eq!(filled, "Header\n\n> a\n\nFooter");
    }

    #[test]
    fn test_fill_template_preface() {
        let filled = fill_template("{preface}\n{events}", "> a", " Hello \n");
        assert_eq!(filled, "Hello\n> a");
    }

    #[test]
    fn test_fill_template_leaves_placeholders_in_values_alone() {
        let filled = fill_template("{preface}\n{events}", "> {preface}", "Say {events} {x}");
        assert_eq!(filled, "Say {events} {x}\n> {preface}");

        let filled = fill_template("{ {events} }", "> a", "");
        assert_eq!(filled, "{ > a }");
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let mut events = vec![
            event("Online", 3, None),
            event("Jam", 2, Some("Hall")),
            event("Stream", 1, Some("Online event")),
            event("Later", 4, None),
        ];
        events[3].mark_future();

        let buckets = Buckets::partition(&events);
        let total =
            buckets.virtual_events.len() + buckets.in_person.len() + buckets.future.len();
        assert_eq!(total, events.len());

        let titles = |list: &[&Event]| list.iter().map(|e| e.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&buckets.virtual_events), vec!["Stream", "Online"]);
        assert_eq!(titles(&buckets.in_person), vec!["Jam"]);
        assert_eq!(titles(&buckets.future), vec!["Later"]);
    }

    #[test]
    fn test_bucket_sort_is_stable() {
        let events = vec![
            event("B", 5, None),
            event("A", 1, None),
            event("C", 5, None),
            event("D", 5, None),
        ];
        let buckets = Buckets::partition(&events);
        let titles: Vec<&str> = buckets
            .virtual_events
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_compose_renders_each_bucket_into_its_template() {
        let mut events = vec![
            event("Stream", 1, None),
            event("Jam", 2, Some("Hall")),
            event("Later", 3, None),
        ];
        events[2].mark_future();

        let composer = Composer::new(LineFormatter::default(), plain_templates());
        let messages = composer.compose(&events, "");

        assert_eq!(
            messages.virtual_events,
            "V\n> :video_game: **Stream** • Saturday, June 1st • 6:00PM - 9:00PM"
        );
        assert_eq!(
            messages.in_person,
            "I\n> :video_game: **Jam** • Sunday, June 2nd • 6:00PM - 9:00PM\n> *:pushpin: Hall*"
        );
        assert_eq!(
            messages.future,
            "F\n> :video_game: **Later** • Monday, June 3rd • 6:00PM - 9:00PM"
        );
    }

    #[test]
    fn test_compose_empty_bucket_keeps_template() {
        let composer = Composer::new(LineFormatter::default(), plain_templates());
        let messages = composer.compose(&[], "");
        assert_eq!(messages.virtual_events, "V");
        assert_eq!(messages.in_person, "I");
        assert_eq!(messages.future, "F");
    }

    #[test]
    fn test_default_templates_wrap_blocks() {
        let events = vec![event("Stream", 1, None)];
        let messages = Composer::default().compose(&events, "");

        assert!(messages
            .virtual_events
            .starts_with("**__*Upcoming Virtual Events*__**\n\n> :video_game: **Stream**"));
        assert!(messages
            .future
            .ends_with("RSVP on meetup!\n<https://www.meetup.com/BuffaloGameSpace/>"));
    }

    #[test]
    fn test_messages_iterate_in_posting_order() {
        let messages = Messages {
            virtual_events: "v".to_string(),
            in_person: "i".to_string(),
            future: "f".to_string(),
        };
        let order: Vec<Bucket> = messages.iter().map(|(bucket, _)| bucket).collect();
        assert_eq!(order, vec![Bucket::Virtual, Bucket::InPerson, Bucket::Future]);
    }
}
