//! NoteStore trait and result types.

use serde::Serialize;

use super::{SearchQuery, StoreError, StoreResult};
use crate::domain::{Note, Tag};

/// A limited result set with the number of rows that matched before the
/// limit was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    notes: Vec<Note>,
    total_matching: usize,
}

impl SearchPage {
    pub fn new(notes: Vec<Note>, total_matching: usize) -> Self {
        Self {
            notes,
            total_matching,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }

    /// Rows that satisfied every filter, ignoring the limit.
    pub fn total_matching(&self) -> usize {
        self.total_matching
    }

    /// Returns true when more rows matched than were returned.
    pub fn is_truncated(&self) -> bool {
        self.total_matching > self.notes.len()
    }
}

/// The tag tree and the number of tags in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagTree {
    roots: Vec<Tag>,
    total: usize,
}

impl TagTree {
    pub fn new(roots: Vec<Tag>) -> Self {
        let total = roots.iter().map(Tag::node_count).sum();
        Self { roots, total }
    }

    pub fn roots(&self) -> &[Tag] {
        &self.roots
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Trims a note identifier, rejecting one that is blank.
///
/// Callers run this before touching the store so a bad identifier is
/// reported even when the database is missing.
pub fn validate_identifier(identifier: &str) -> StoreResult<&str> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(StoreError::InvalidIdentifier);
    }
    Ok(identifier)
}

/// Read access to Bear's notes.
pub trait NoteStore {
    /// Fetches one note with its body and attachment text.
    ///
    /// Returns `None` if no visible note has this identifier.
    fn get_note(&self, identifier: &str) -> StoreResult<Option<Note>>;

    /// Searches notes. All present filters must hold.
    fn search(&self, query: &SearchQuery) -> StoreResult<SearchPage>;

    /// Builds the tag tree from tags that currently carry notes.
    fn list_tags(&self) -> StoreResult<TagTree>;

    /// Lists notes without any tag, most recently modified first.
    fn find_untagged(&self, limit: Option<usize>) -> StoreResult<SearchPage>;
}
