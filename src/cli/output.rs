//! Output format types and renderers for CLI commands.

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Note, Tag};
use crate::store::SearchPage;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain note identifiers (or tag paths), one per line
    Ids,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub pinned: bool,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.identifier().to_string(),
            title: note.title().to_string(),
            created: note.created(),
            modified: note.modified(),
            pinned: note.pinned(),
        }
    }
}

/// A page of notes with the true number of matches.
#[derive(Debug, Serialize)]
pub struct PageListing {
    pub notes: Vec<NoteListing>,
    pub total_matching: usize,
    pub truncated: bool,
}

impl From<&SearchPage> for PageListing {
    fn from(page: &SearchPage) -> Self {
        Self {
            notes: page.notes().iter().map(NoteListing::from).collect(),
            total_matching: page.total_matching(),
            truncated: page.is_truncated(),
        }
    }
}

/// Result of a URL-scheme action.
#[derive(Debug, Serialize)]
pub struct ActionListing {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
}

// ===========================================
// Human renderers
// ===========================================

fn local_date(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Header line for a page, noting truncation.
///
/// `Found 3 notes (7 total matching):` or `Found 1 note:`.
pub fn page_header(page: &SearchPage, noun: &str) -> String {
    let shown = page.notes().len();
    if page.is_truncated() {
        format!(
            "Found {shown} {noun}s ({} total matching):",
            page.total_matching()
        )
    } else {
        format!("Found {}:", plural(shown, noun))
    }
}

/// Numbered entries, one block per note.
pub fn note_entries(notes: &[Note]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, note) in notes.iter().enumerate() {
        let pin = if note.pinned() { " (pinned)" } else { "" };
        lines.push(format!("{}. {}{pin}", index + 1, note.title()));
        lines.push(format!(
            "   Created: {}  Modified: {}",
            local_date(note.created()),
            local_date(note.modified())
        ));
        lines.push(format!("   ID: {}", note.identifier()));
        lines.push(String::new());
    }
    lines
}

/// Full note view for `open`.
pub fn note_view(note: &Note) -> String {
    let body = note
        .body()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or("*This note appears to be empty.*");
    format!(
        "# {}\nModified: {}  ID: {}\n\n---\n\n{}",
        note.title(),
        local_date(note.modified()),
        note.identifier(),
        body
    )
}

/// Renders root tags flush left and their descendants with box-drawing
/// connectors.
pub fn tag_tree_lines(roots: &[Tag]) -> Vec<String> {
    let mut lines = Vec::new();
    for root in roots {
        lines.push(format!("{} ({})", root.display_name(), root.note_count()));
        branch_lines(root.children(), "", &mut lines);
    }
    lines
}

fn branch_lines(tags: &[Tag], prefix: &str, lines: &mut Vec<String>) {
    for (i, tag) in tags.iter().enumerate() {
        let last = i + 1 == tags.len();
        let connector = if last { "└── " } else { "├── " };
        lines.push(format!(
            "{prefix}{connector}{} ({})",
            tag.display_name(),
            tag.note_count()
        ));
        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        branch_lines(tag.children(), &child_prefix, lines);
    }
}

/// Full paths of every tag, depth-first.
pub fn tag_paths(roots: &[Tag]) -> Vec<String> {
    fn walk(tag: &Tag, out: &mut Vec<String>) {
        out.push(tag.full_path().to_string());
        for child in tag.children() {
            walk(child, out);
        }
    }
    let mut out = Vec::new();
    for root in roots {
        walk(root, &mut out);
    }
    out
}
