//! Normalized, slash-delimited tag paths and tag tree nodes.

use serde::Serialize;
use std::fmt;

/// A normalized tag path such as `career/content/blog`.
///
/// Tag names come out of Bear's store with `+` standing in for spaces.
/// Normalization decodes those, trims surrounding whitespace and folds to
/// lowercase, which matches how Bear presents tags in its sidebar.
///
/// # Examples
///
/// ```
/// use bear_notes::domain::TagPath;
///
/// let path = TagPath::new("Career/Content+Ideas ").unwrap();
/// assert_eq!(path.as_str(), "career/content ideas");
/// assert_eq!(path.display_name(), "content ideas");
/// assert_eq!(path.parent().unwrap().as_str(), "career");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TagPath(String);

impl TagPath {
    /// Normalizes a raw tag name. Returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.replace('+', " ").trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Returns the normalized path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the final path segment.
    pub fn display_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Returns the path truncated at the last `/`, or `None` for a root path.
    pub fn parent(&self) -> Option<TagPath> {
        let idx = self.0.rfind('/')?;
        let parent = &self.0[..idx];
        if parent.is_empty() {
            None
        } else {
            Some(Self(parent.to_string()))
        }
    }

    /// Returns whether `other` is this path or lies beneath it.
    ///
    /// `work` contains `work/meetings` but not `workshop`.
    pub fn contains(&self, other: &TagPath) -> bool {
        match other.0.strip_prefix(self.0.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagPath(\"{}\")", self.0)
    }
}

/// A flat tag row: a path and the number of notes carrying exactly it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub path: TagPath,
    pub note_count: u32,
}

impl TagCount {
    pub fn new(path: TagPath, note_count: u32) -> Self {
        Self { path, note_count }
    }
}

/// A node in the tag tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    full_path: TagPath,
    display_name: String,
    note_count: u32,
    children: Vec<Tag>,
}

impl Tag {
    /// Creates a leaf node for the given path.
    pub fn new(full_path: TagPath, note_count: u32) -> Self {
        let display_name = full_path.display_name().to_string();
        Self {
            full_path,
            display_name,
            note_count,
            children: Vec::new(),
        }
    }

    pub fn full_path(&self) -> &TagPath {
        &self.full_path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn note_count(&self) -> u32 {
        self.note_count
    }

    pub fn children(&self) -> &[Tag] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Tag> {
        &mut self.children
    }

    /// Counts this node and every node beneath it.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Tag::node_count).sum::<usize>()
    }
}
