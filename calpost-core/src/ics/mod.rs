//! Calendar feed (ICS) decoding and conversion into events CSV rows.

mod convert;
mod parse;

pub use convert::{convert_feed, to_rows};
pub use parse::{parse_feed, FeedEntry, FeedTime};
