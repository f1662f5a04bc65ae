//! Tags command handler.

use anyhow::Result;
use std::io::Write;

use super::{AppContext, write_lines};
use crate::cli::output::{Output, OutputFormat, tag_paths, tag_tree_lines};
use crate::store::NoteStore;

pub fn handle_tags(ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    let tree = ctx.with_store(|store| store.list_tags())?;

    match ctx.format {
        OutputFormat::Human => {
            if tree.is_empty() {
                writeln!(out, "No tags found in your Bear library.")?;
                return Ok(());
            }
            let noun = if tree.total() == 1 { "tag" } else { "tags" };
            writeln!(out, "Found {} {noun}:", tree.total())?;
            writeln!(out)?;
            write_lines(out, tag_tree_lines(tree.roots()))?;
        }
        OutputFormat::Json => writeln!(out, "{}", Output::new(&tree).to_json()?)?,
        OutputFormat::Ids => write_lines(out, tag_paths(tree.roots()))?,
    }
    Ok(())
}
