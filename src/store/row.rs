//! Maps raw store rows to domain notes.

use rusqlite::Row;
use rusqlite::types::Value;

use super::{StoreError, StoreResult};
use crate::domain::{Attachment, Note, timestamp};

/// Heading that opens the attachment section of a note body.
pub const ATTACHMENTS_HEADING: &str = "--- Attached Files ---";
/// Marker used when a note has no attachments.
pub const NO_ATTACHMENTS: &str = "*No attached files*";
/// Marker used for an attachment without extracted text.
pub const NO_EXTRACTED_TEXT: &str = "*No extracted text*";

/// A note row exactly as selected, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRow {
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub created: Value,
    pub modified: Value,
    pub pinned: Option<i64>,
    pub text: Option<String>,
}

impl NoteRow {
    /// Reads the note columns by alias.
    ///
    /// Expects `identifier`, `title`, `created` and `modified`; `pinned` and
    /// `text` are read when the statement selects them.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            identifier: row.get("identifier")?,
            title: row.get("title")?,
            created: row.get("created")?,
            modified: row.get("modified")?,
            pinned: optional_column(row, "pinned")?,
            text: optional_column(row, "text")?,
        })
    }
}

/// A note row joined with at most one attachment row.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub note: NoteRow,
    pub filename: Option<String>,
    pub file_text: Option<String>,
}

impl JoinedRow {
    /// Reads the note columns plus `filename` and `file_text`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            note: NoteRow::from_row(row)?,
            filename: row.get("filename")?,
            file_text: row.get("file_text")?,
        })
    }

    fn attachment(&self) -> Option<Attachment> {
        let filename = self.filename.as_deref().filter(|f| !f.trim().is_empty())?;
        Some(Attachment::new(filename, self.file_text.clone()))
    }
}

fn optional_column<T: rusqlite::types::FromSql>(
    row: &Row<'_>,
    name: &str,
) -> rusqlite::Result<Option<T>> {
    match row.get::<_, Option<T>>(name) {
        Ok(value) => Ok(value),
        Err(rusqlite::Error::InvalidColumnName(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Maps one note row.
///
/// # Errors
///
/// Returns `StoreError::MalformedRow` if the identifier is missing or blank,
/// or if either timestamp is not numeric.
pub fn map_note(row: &NoteRow) -> StoreResult<Note> {
    let identifier = row
        .identifier
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StoreError::MalformedRow("note identifier is missing".to_string()))?;

    let created = parse_timestamp(&row.created, "creation date", identifier)?;
    let modified = parse_timestamp(&row.modified, "modification date", identifier)?;

    let mut note = Note::new(identifier, row.title.clone(), created, modified)
        .with_pinned(row.pinned.unwrap_or(0) != 0);

    if let Some(text) = &row.text {
        note = note.with_body(text.clone());
    }

    Ok(note)
}

/// Maps a group of joined rows sharing one identifier into a single note.
///
/// Attachment sections are appended to the body in join order under
/// [`ATTACHMENTS_HEADING`]. A note without attachments gets
/// [`NO_ATTACHMENTS`] so the body shape never depends on whether any files
/// exist.
///
/// # Errors
///
/// Returns `StoreError::MalformedRow` if the group is empty, if rows
/// disagree on the identifier, or if the first row fails [`map_note`].
pub fn map_note_with_attachments(rows: &[JoinedRow]) -> StoreResult<Note> {
    let first = rows
        .first()
        .ok_or_else(|| StoreError::MalformedRow("empty row group".to_string()))?;
    let note = map_note(&first.note)?;

    if let Some(stray) = rows
        .iter()
        .filter_map(|r| r.note.identifier.as_deref())
        .find(|id| id.trim() != note.identifier())
    {
        return Err(StoreError::MalformedRow(format!(
            "row group mixes identifiers {} and {}",
            note.identifier(),
            stray
        )));
    }

    let attachments: Vec<Attachment> = rows.iter().filter_map(JoinedRow::attachment).collect();
    let body = append_attachments(note.body().unwrap_or_default(), &attachments);

    Ok(note.with_body(body))
}

fn append_attachments(body: &str, attachments: &[Attachment]) -> String {
    let sections = if attachments.is_empty() {
        NO_ATTACHMENTS.to_string()
    } else {
        attachments
            .iter()
            .map(|a| format!("**{}**\n{}", a.filename, a.text().unwrap_or(NO_EXTRACTED_TEXT)))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!("{body}\n\n{ATTACHMENTS_HEADING}\n\n{sections}")
}

fn parse_timestamp(
    value: &Value,
    field: &str,
    identifier: &str,
) -> StoreResult<chrono::DateTime<chrono::Utc>> {
    let seconds = match value {
        Value::Real(v) => *v,
        Value::Integer(v) => *v as f64,
        _ => {
            return Err(StoreError::MalformedRow(format!(
                "{field} is not numeric for note {identifier}"
            )));
        }
    };

    timestamp::to_instant(seconds).ok_or_else(|| {
        StoreError::MalformedRow(format!("{field} is out of range for note {identifier}"))
    })
}
