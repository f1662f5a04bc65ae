//! Mutating operations, each dispatched as one Bear action URL.

use super::{ActionError, ActionResult, ActionRunner, BearUrl};
use crate::domain::{Note, compose_body, encode_tag_line};
use crate::store::{NoteStore, validate_identifier};
use clap::ValueEnum;

/// Where `add_text` inserts into the note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InsertPosition {
    /// Append to the end (default)
    #[default]
    End,
    /// Prepend to the beginning
    Beginning,
}

impl InsertPosition {
    pub fn mode(self) -> &'static str {
        match self {
            InsertPosition::End => "append",
            InsertPosition::Beginning => "prepend",
        }
    }
}

/// Input for `create`. Every field is optional; Bear accepts an empty note.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: Option<String>,
    pub text: Option<String>,
    /// Comma-separated tag names.
    pub tags: Option<String>,
}

/// Input for `add_file`. Either `id` or `title` must be set.
#[derive(Debug, Clone, Default)]
pub struct FileAttachment {
    pub id: Option<String>,
    pub title: Option<String>,
    pub filename: String,
    pub base64: String,
}

/// The URL an action dispatched and the note it was aimed at, when known.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub url: BearUrl,
    pub note: Option<Note>,
}

/// Builds action URLs and hands them to a runner.
///
/// Operations on an existing note look it up first so a stale identifier
/// fails with `NoteNotFound` instead of an opaque error from Bear.
pub struct BearActions<R> {
    runner: R,
    note_conventions: bool,
}

impl<R: ActionRunner> BearActions<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            note_conventions: false,
        }
    }

    /// Embed tags as an inline line at the top of new notes.
    pub fn note_conventions(mut self, enabled: bool) -> Self {
        self.note_conventions = enabled;
        self
    }

    pub fn create(&self, note: &NewNote) -> ActionResult<Dispatched> {
        let (text, tags) = if self.note_conventions {
            let line = encode_tag_line(note.tags.as_deref());
            let text = match line {
                Some(line) => compose_body(Some(&line), note.text.as_deref()),
                None => note.text.clone(),
            };
            (text, None)
        } else {
            (note.text.clone(), note.tags.clone())
        };

        let url = BearUrl::new("create")?
            .param("title", note.title.as_deref())
            .param("text", text.as_deref())
            .param("tags", tags.as_deref());
        self.dispatch(url, None)
    }

    pub fn add_text<S: NoteStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
        text: &str,
        header: Option<&str>,
        position: InsertPosition,
    ) -> ActionResult<Dispatched> {
        validate_add_text(id, text)?;
        let note = require_note(store, id)?;

        let header = header.map(strip_heading_marker);
        let url = BearUrl::new("add-text")?
            .param("id", Some(note.identifier()))
            .param("text", Some(text))
            .param("header", header)
            .param("mode", Some(position.mode()));
        self.dispatch(url, Some(note))
    }

    /// The target note is only looked up when addressed by identifier.
    pub fn add_file<S: NoteStore + ?Sized>(
        &self,
        store: &S,
        file: &FileAttachment,
    ) -> ActionResult<Dispatched> {
        let content = validate_add_file(file)?;
        let id = non_blank(file.id.as_deref());
        let title = non_blank(file.title.as_deref());

        let note = id.map(|id| require_note(store, id)).transpose()?;

        let url = BearUrl::new("add-file")?
            .param("id", id)
            .param("title", title)
            .param("file", Some(content.as_str()))
            .param("filename", Some(file.filename.as_str()))
            .param("mode", Some("append"));
        self.dispatch(url, note)
    }

    pub fn add_tags<S: NoteStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
        tags: &[String],
    ) -> ActionResult<Dispatched> {
        let tags = validate_add_tags(id, tags)?;
        let note = require_note(store, id)?;

        let joined = tags.join(",");
        let url = BearUrl::new("add-text")?
            .param("id", Some(note.identifier()))
            .param("tags", Some(joined.as_str()))
            .param("mode", Some("prepend"))
            .param("open_note", Some("no"))
            .param("show_window", Some("no"))
            .param("new_window", Some("no"));
        self.dispatch(url, Some(note))
    }

    pub fn archive<S: NoteStore + ?Sized>(&self, store: &S, id: &str) -> ActionResult<Dispatched> {
        validate_identifier(id)?;
        let note = require_note(store, id)?;
        let url = BearUrl::new("archive")?
            .param("id", Some(note.identifier()))
            .param("show_window", Some("no"));
        self.dispatch(url, Some(note))
    }

    fn dispatch(&self, url: BearUrl, note: Option<Note>) -> ActionResult<Dispatched> {
        tracing::info!(
            action = url.action(),
            id = note.as_ref().map(Note::identifier),
            "dispatching Bear action"
        );
        self.runner.run(&url)?;
        Ok(Dispatched { url, note })
    }
}

// ===========================================
// Input checks
// ===========================================
//
// Each operation runs its check first. The CLI also runs them before
// opening the store, so bad input is reported even without a database.

pub fn validate_add_text(id: &str, text: &str) -> ActionResult<()> {
    validate_identifier(id)?;
    if text.trim().is_empty() {
        return Err(ActionError::MissingInput("text"));
    }
    Ok(())
}

/// Returns the trimmed, non-blank tags.
pub fn validate_add_tags<'a>(id: &str, tags: &'a [String]) -> ActionResult<Vec<&'a str>> {
    validate_identifier(id)?;
    let tags: Vec<&str> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(ActionError::MissingInput("at least one tag"));
    }
    Ok(tags)
}

/// Returns the base64 content with all whitespace removed.
pub fn validate_add_file(file: &FileAttachment) -> ActionResult<String> {
    if non_blank(file.id.as_deref()).is_none() && non_blank(file.title.as_deref()).is_none() {
        return Err(ActionError::MissingInput("note ID or title"));
    }
    if file.filename.trim().is_empty() {
        return Err(ActionError::MissingInput("filename"));
    }
    let content: String = file.base64.split_whitespace().collect();
    if content.is_empty() {
        return Err(ActionError::MissingInput("file content"));
    }
    Ok(content)
}

fn require_note<S: NoteStore + ?Sized>(store: &S, id: &str) -> ActionResult<Note> {
    store.get_note(id)?.ok_or_else(|| {
        tracing::info!(id, "action target not found");
        ActionError::NoteNotFound { id: id.trim().to_string() }
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Drops leading markdown heading hashes and the whitespace after them.
fn strip_heading_marker(header: &str) -> &str {
    let header = header.trim();
    if header.starts_with('#') {
        header.trim_start_matches('#').trim_start()
    } else {
        header
    }
}
