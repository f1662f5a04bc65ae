//! Command handlers for the CLI.
//!
//! Handlers write to the given sink rather than stdout so they can be
//! exercised directly in tests.

mod actions;
mod open;
mod search;
mod tags;


use anyhow::Result;
use clap::CommandFactory;
use std::io::Write;

use crate::actions::{ActionRunner, BearActions, OpenCommand};
use crate::cli::config::Config;
use crate::cli::output::OutputFormat;
use crate::cli::{Cli, CompletionsArgs};
use crate::store::{BearStore, StoreError, StoreLocation, with_store};

pub use actions::{handle_add_file, handle_add_tag, handle_add_text, handle_archive, handle_create};
pub use open::handle_open;
pub use search::{handle_search, handle_untagged};
pub use tags::handle_tags;

// ===========================================
// Shared Context
// ===========================================

/// Everything a handler needs besides its own arguments.
pub struct AppContext {
    pub location: StoreLocation,
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(location: StoreLocation, config: Config, format: OutputFormat) -> Self {
        Self {
            location,
            config,
            format,
        }
    }

    /// Opens the store for one operation.
    pub(crate) fn with_store<T, E: From<StoreError>>(
        &self,
        op: impl FnOnce(&BearStore) -> Result<T, E>,
    ) -> Result<T, E> {
        with_store(&self.location, self.config.search_attachments, op)
    }

    /// Action dispatcher configured from this context.
    pub(crate) fn actions<R: ActionRunner>(&self, runner: R) -> BearActions<R> {
        BearActions::new(runner).note_conventions(self.config.note_conventions)
    }

    /// The configured URL launcher.
    pub fn launcher(&self) -> OpenCommand {
        OpenCommand::with_program(&self.config.launcher)
    }
}

pub fn handle_completions(args: &CompletionsArgs, out: &mut impl Write) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(args.shell, &mut command, name, out);
    Ok(())
}

/// Writes each line followed by a newline.
pub(crate) fn write_lines<S: AsRef<str>>(
    out: &mut impl Write,
    lines: impl IntoIterator<Item = S>,
) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    Ok(())
}
