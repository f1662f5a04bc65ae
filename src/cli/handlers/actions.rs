//! Handlers for commands that change notes through Bear's URL scheme.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::{Read, Write};
use std::path::Path;

use super::AppContext;
use crate::actions::{
    ActionRunner, Dispatched, FileAttachment, InsertPosition, NewNote, validate_add_file,
    validate_add_tags, validate_add_text,
};
use crate::cli::output::{ActionListing, Output, OutputFormat};
use crate::cli::{AddFileArgs, AddTagArgs, AddTextArgs, ArchiveArgs, CreateArgs};
use crate::domain::Note;
use crate::store::validate_identifier;

pub fn handle_create<R: ActionRunner>(
    args: &CreateArgs,
    ctx: &AppContext,
    runner: R,
    out: &mut impl Write,
) -> Result<()> {
    let note = NewNote {
        title: args.title.clone(),
        text: args.text.clone(),
        tags: args.tags.clone(),
    };
    let dispatched = ctx
        .actions(runner)
        .create(&note)
        .context("failed to create note")?;

    report(ctx, out, &dispatched, || {
        let mut lines = Vec::new();
        if let Some(title) = non_blank(&args.title) {
            lines.push(format!("Title: \"{title}\""));
        }
        if let Some(text) = non_blank(&args.text) {
            lines.push(format!("Content: {} characters", text.chars().count()));
        }
        if let Some(tags) = non_blank(&args.tags) {
            lines.push(format!("Tags: {tags}"));
        }
        if lines.is_empty() {
            "Empty note created.".to_string()
        } else {
            format!("Bear note created successfully!\n\n{}", lines.join("\n"))
        }
    })
}

pub fn handle_add_text<R: ActionRunner>(
    args: &AddTextArgs,
    ctx: &AppContext,
    runner: R,
    out: &mut impl Write,
) -> Result<()> {
    validate_add_text(&args.id, &args.text)?;
    let actions = ctx.actions(runner);
    let dispatched = ctx.with_store(|store| {
        actions.add_text(store, &args.id, &args.text, args.header.as_deref(), args.position)
    })?;

    let verb = match args.position {
        InsertPosition::End => "appended",
        InsertPosition::Beginning => "prepended",
    };
    report(ctx, out, &dispatched, || {
        let mut message = format!(
            "Text {verb} to note \"{}\" successfully!\n\nText: {} characters",
            target_title(&dispatched),
            args.text.trim().chars().count()
        );
        if let Some(header) = non_blank(&args.header) {
            message.push_str(&format!("\nSection: {header}"));
        }
        message
    })
}

pub fn handle_add_file<R: ActionRunner>(
    args: &AddFileArgs,
    ctx: &AppContext,
    runner: R,
    out: &mut impl Write,
) -> Result<()> {
    let filename = match (&args.filename, args.path.file_name()) {
        (Some(name), _) => name.clone(),
        (None, Some(name)) if args.path != Path::new("-") => name.to_string_lossy().into_owned(),
        _ => bail!("--filename is required when reading from stdin"),
    };
    let base64 = read_content(&args.path, args.encoded)?;

    let file = FileAttachment {
        id: args.id.clone(),
        title: args.title.clone(),
        filename: filename.clone(),
        base64,
    };

    validate_add_file(&file)?;
    let actions = ctx.actions(runner);
    let dispatched = ctx.with_store(|store| actions.add_file(store, &file))?;

    report(ctx, out, &dispatched, || {
        let target = match (&dispatched.note, non_blank(&args.title)) {
            (Some(note), _) => format!("Note ID: {}", note.identifier()),
            (None, Some(title)) => format!("Note title: \"{title}\""),
            (None, None) => String::new(),
        };
        format!("File \"{filename}\" added successfully!\n\n{target}")
    })
}

pub fn handle_add_tag<R: ActionRunner>(
    args: &AddTagArgs,
    ctx: &AppContext,
    runner: R,
    out: &mut impl Write,
) -> Result<()> {
    validate_add_tags(&args.id, &args.tags)?;
    let actions = ctx.actions(runner);
    let dispatched = ctx.with_store(|store| actions.add_tags(store, &args.id, &args.tags))?;

    report(ctx, out, &dispatched, || {
        let tags: Vec<String> = args
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| format!("#{t}"))
            .collect();
        format!(
            "Tags added successfully!\n\nNote: \"{}\"\nTags: {}",
            target_title(&dispatched),
            tags.join(", ")
        )
    })
}

pub fn handle_archive<R: ActionRunner>(
    args: &ArchiveArgs,
    ctx: &AppContext,
    runner: R,
    out: &mut impl Write,
) -> Result<()> {
    validate_identifier(&args.id)?;
    let actions = ctx.actions(runner);
    let dispatched = ctx.with_store(|store| actions.archive(store, &args.id))?;

    report(ctx, out, &dispatched, || {
        format!(
            "Note archived successfully!\n\nNote: \"{}\"\nID: {}",
            target_title(&dispatched),
            args.id.trim()
        )
    })
}

// ===========================================
// Helpers
// ===========================================

fn target_title(dispatched: &Dispatched) -> &str {
    dispatched.note.as_ref().map_or("", Note::title)
}

fn report(
    ctx: &AppContext,
    out: &mut impl Write,
    dispatched: &Dispatched,
    human: impl FnOnce() -> String,
) -> Result<()> {
    let note = dispatched.note.as_ref();
    match ctx.format {
        OutputFormat::Human => writeln!(out, "{}", human())?,
        OutputFormat::Json => {
            let listing = ActionListing {
                action: dispatched.url.action().to_string(),
                id: note.map(|n| n.identifier().to_string()),
                title: note.map(|n| n.title().to_string()),
                url: dispatched.url.to_string(),
            };
            writeln!(out, "{}", Output::new(listing).to_json()?)?;
        }
        OutputFormat::Ids => {
            if let Some(note) = note {
                writeln!(out, "{}", note.identifier())?;
            }
        }
    }
    Ok(())
}

fn read_content(path: &Path, encoded: bool) -> Result<String> {
    let mut bytes = Vec::new();
    if path == Path::new("-") {
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read file content from stdin")?;
    } else {
        bytes = std::fs::read(path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
    }

    if encoded {
        String::from_utf8(bytes).context("base64 input is not valid UTF-8")
    } else {
        Ok(STANDARD.encode(bytes))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
