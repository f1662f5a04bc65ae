//! Builder for fixture notes with sensible defaults.

// Allow dead code since this is a test utility shared across test binaries
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// A note to insert into a fixture Bear database.
///
/// Identifiers are generated unless set, and both timestamps default to
/// 2025-01-01T00:00:00Z.
#[derive(Debug, Clone)]
pub struct TestNote {
    id: String,
    title: String,
    text: String,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    pinned: bool,
    archived: bool,
    trashed: bool,
    tags: Vec<String>,
    attachments: Vec<(String, Option<String>)>,
}

impl TestNote {
    /// Creates a new test note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Self {
            id: format!("TEST-NOTE-{n:04}"),
            title: title.into(),
            text: String::new(),
            created: at,
            modified: at,
            pinned: false,
            archived: false,
            trashed: false,
            tags: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Sets an explicit identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the body text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Adds a tag, stored exactly as given.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Attaches a file with optional extracted text.
    pub fn attachment(mut self, filename: impl Into<String>, text: Option<&str>) -> Self {
        self.attachments
            .push((filename.into(), text.map(str::to_string)));
        self
    }

    /// Moves both timestamps by whole minutes from the default.
    pub fn minutes_later(mut self, minutes: i64) -> Self {
        self.created += Duration::minutes(minutes);
        self.modified += Duration::minutes(minutes);
        self
    }

    /// Sets the modification time.
    pub fn modified(mut self, at: DateTime<Utc>) -> Self {
        self.modified = at;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    pub fn trashed(mut self) -> Self {
        self.trashed = true;
        self
    }

    // Accessors used by TestEnv

    pub fn note_id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn get_text(&self) -> &str {
        &self.text
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn flags(&self) -> (bool, bool, bool) {
        (self.pinned, self.archived, self.trashed)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn attachments(&self) -> &[(String, Option<String>)] {
        &self.attachments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_generates_distinct_ids() {
        let a = TestNote::new("A");
        let b = TestNote::new("B");
        assert_ne!(a.note_id(), b.note_id());
    }

    #[test]
    fn test_note_builder_fluent() {
        let note = TestNote::new("Receipts")
            .id("FIXED")
            .text("March")
            .tag("finance")
            .attachment("r.pdf", Some("Total"))
            .pinned();

        assert_eq!(note.note_id(), "FIXED");
        assert_eq!(note.get_text(), "March");
        assert_eq!(note.tags(), ["finance".to_string()]);
        assert_eq!(note.attachments().len(), 1);
        assert_eq!(note.flags(), (true, false, false));
    }
}
