//! Search and untagged command handlers.

use anyhow::Result;
use std::io::Write;

use super::{AppContext, write_lines};
use crate::cli::output::{Output, OutputFormat, PageListing, note_entries, page_header};
use crate::cli::{SearchArgs, UntaggedArgs};
use crate::domain::{DateFilter, DatePhrases};
use crate::store::{NoteStore, SearchPage, SearchQuery, StoreError};

pub fn handle_search(args: &SearchArgs, ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    let query = build_query(args, ctx)?;
    let page = ctx.with_store(|store| store.search(&query))?;

    match ctx.format {
        OutputFormat::Human => {
            if page.notes().is_empty() {
                writeln!(out, "No notes found matching {}.", describe_criteria(args))?;
                return Ok(());
            }
            print_page(&page, "note", out)?;
            writeln!(out, "Use `bear open <ID>` to read the full content of any note.")?;
            if page.is_truncated() {
                writeln!(
                    out,
                    "Use --limit {} to get all results.",
                    page.total_matching()
                )?;
            }
        }
        OutputFormat::Json => print_json(&page, out)?,
        OutputFormat::Ids => print_ids(&page, out)?,
    }
    Ok(())
}

pub fn handle_untagged(args: &UntaggedArgs, ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    let limit = ctx.config.limit(args.limit);
    let page = ctx.with_store(|store| store.find_untagged(Some(limit)))?;

    match ctx.format {
        OutputFormat::Human => {
            if page.notes().is_empty() {
                writeln!(out, "No untagged notes found. All your notes have tags!")?;
                return Ok(());
            }
            print_page(&page, "untagged note", out)?;
            writeln!(out, "Use `bear tags` to see available tags.")?;
            if page.is_truncated() {
                writeln!(
                    out,
                    "Use --limit {} to get all results.",
                    page.total_matching()
                )?;
            }
        }
        OutputFormat::Json => print_json(&page, out)?,
        OutputFormat::Ids => print_ids(&page, out)?,
    }
    Ok(())
}

/// Parses date phrases and applies the configured default limit.
///
/// Fails before the store is opened when no filter was given.
pub(crate) fn build_query(args: &SearchArgs, ctx: &AppContext) -> Result<SearchQuery> {
    let phrases = DatePhrases {
        created_after: args.created_after.clone(),
        created_before: args.created_before.clone(),
        modified_after: args.modified_after.clone(),
        modified_before: args.modified_before.clone(),
    };
    let dates = DateFilter::parse(&phrases).map_err(StoreError::from)?;

    let query = SearchQuery {
        term: args.term.clone(),
        tag: args.tag.clone(),
        limit: Some(ctx.config.limit(args.limit)),
        dates,
        pinned_only: args.pinned,
    };
    if !query.has_criteria() {
        return Err(StoreError::MissingSearchCriteria.into());
    }
    Ok(query)
}

/// Human summary of the criteria, for the empty-result message.
pub(crate) fn describe_criteria(args: &SearchArgs) -> String {
    let quoted = [
        ("term", &args.term),
        ("tag", &args.tag),
        ("created after", &args.created_after),
        ("created before", &args.created_before),
        ("modified after", &args.modified_after),
        ("modified before", &args.modified_before),
    ];
    let mut parts: Vec<String> = quoted
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{label} \"{v}\""))
        })
        .collect();
    if args.pinned {
        parts.push("pinned only".to_string());
    }
    parts.join(", ")
}

fn print_page(page: &SearchPage, noun: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", page_header(page, noun))?;
    writeln!(out)?;
    write_lines(out, note_entries(page.notes()))
}

fn print_json(page: &SearchPage, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", Output::new(PageListing::from(page)).to_json()?)?;
    Ok(())
}

fn print_ids(page: &SearchPage, out: &mut impl Write) -> Result<()> {
    write_lines(out, page.notes().iter().map(|n| n.identifier()))
}
