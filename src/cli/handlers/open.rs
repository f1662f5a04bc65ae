//! Open command handler.

use anyhow::{Result, bail};
use std::io::Write;

use super::AppContext;
use crate::cli::OpenArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat, note_view};
use crate::store::{NoteStore, validate_identifier};

#[derive(serde::Serialize)]
struct NoteContent<'a> {
    #[serde(flatten)]
    listing: NoteListing,
    body: Option<&'a str>,
}

pub fn handle_open(args: &OpenArgs, ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    let id = validate_identifier(&args.id)?;
    let Some(note) = ctx.with_store(|store| store.get_note(id))? else {
        bail!(
            "note with ID '{}' not found; it may have been deleted, archived, or the ID may be incorrect",
            id
        );
    };

    match ctx.format {
        OutputFormat::Human => writeln!(out, "{}", note_view(&note))?,
        OutputFormat::Json => {
            let content = NoteContent {
                listing: NoteListing::from(&note),
                body: note.body(),
            };
            writeln!(out, "{}", Output::new(content).to_json()?)?;
        }
        OutputFormat::Ids => writeln!(out, "{}", note.identifier())?,
    }
    Ok(())
}
