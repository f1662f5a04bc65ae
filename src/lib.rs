//! bear-notes - search, read, and annotate Bear notes from the terminal

pub mod actions;
pub mod cli;
pub mod domain;
pub mod store;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use cli::{
    Cli, Command,
    config::{Config, DEBUG_ENV},
    handlers::{
        AppContext, handle_add_file, handle_add_tag, handle_add_text, handle_archive,
        handle_completions, handle_create, handle_open, handle_search, handle_tags,
        handle_untagged,
    },
    logging::init_logging,
};
use store::{DB_PATH_ENV, StoreLocation};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let debug_env = std::env::var(DEBUG_ENV).ok();
    init_logging(cli.verbose, config.debug_enabled(debug_env.as_deref()));

    let env_db = std::env::var_os(DB_PATH_ENV).map(PathBuf::from);
    let location = StoreLocation::resolve(
        [cli.db.as_deref(), env_db.as_deref(), config.database.as_deref()],
        dirs::home_dir().as_deref(),
    );
    tracing::debug!(path = %location.path().display(), "resolved Bear database location");

    let ctx = AppContext::new(location, config, cli.format);
    let launcher = ctx.launcher();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Search(args) => handle_search(args, &ctx, &mut out),
        Command::Open(args) => handle_open(args, &ctx, &mut out),
        Command::Create(args) => handle_create(args, &ctx, &launcher, &mut out),
        Command::AddText(args) => handle_add_text(args, &ctx, &launcher, &mut out),
        Command::AddFile(args) => handle_add_file(args, &ctx, &launcher, &mut out),
        Command::AddTag(args) => handle_add_tag(args, &ctx, &launcher, &mut out),
        Command::Archive(args) => handle_archive(args, &ctx, &launcher, &mut out),
        Command::Tags => handle_tags(&ctx, &mut out),
        Command::Untagged(args) => handle_untagged(args, &ctx, &mut out),
        Command::Completions(args) => handle_completions(args, &mut out),
    }
}
