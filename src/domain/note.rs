//! Note and attachment entities read from Bear's store.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Title shown for notes that have none.
pub const UNTITLED: &str = "Untitled";

/// A note as projected from Bear's store.
///
/// Every read produces fresh values; nothing is cached or mutated in place.
/// The identifier is Bear's `ZUNIQUEIDENTIFIER` and is never empty.
///
/// The stored title may be absent. [`Note::title`] falls back to
/// [`UNTITLED`] for display, while [`Note::stored_title`] keeps the
/// distinction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    identifier: String,
    title: Option<String>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

impl Note {
    /// Creates a note with required fields only.
    ///
    /// A blank title is stored as absent.
    pub fn new(
        identifier: impl Into<String>,
        title: Option<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.filter(|t| !t.trim().is_empty()),
            created,
            modified,
            pinned: false,
            body: None,
        }
    }

    /// Sets the pinned flag.
    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Sets the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the note's unique identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the title for display, falling back to [`UNTITLED`].
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Returns the title as stored, if any.
    pub fn stored_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Only meaningful for reads that selected the pinned column.
    pub fn pinned(&self) -> bool {
        self.pinned
    }

    /// Returns the body, present only for content-level reads.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// A file attached to a note, with any text Bear extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub filename: String,
    pub extracted_text: Option<String>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, extracted_text: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            extracted_text,
        }
    }

    /// Returns the extracted text when it holds more than whitespace.
    pub fn text(&self) -> Option<&str> {
        self.extracted_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
