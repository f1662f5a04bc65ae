//! Core types: Note, Attachment, TagPath, Tag tree, timestamps and date filters

mod date_filter;
mod date_phrase;
mod hierarchy;
mod note;
mod tag;
mod tag_syntax;
pub mod timestamp;

pub use date_filter::{DateFilter, DatePhrases};
pub use date_phrase::{
    InvalidDateFormat, SUPPORTED_PHRASES, end_of_day, parse_date_phrase, parse_date_phrase_at,
    start_of_day,
};
pub use hierarchy::build_tag_tree;
pub use note::{Attachment, Note, UNTITLED};
pub use tag::{Tag, TagCount, TagPath};
pub use tag_syntax::{TAG_LINE_SEPARATOR, compose_body, encode_tag, encode_tag_line};
