//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::actions::InsertPosition;
use output::OutputFormat;

/// bear - search, read, and annotate Bear notes from the terminal
#[derive(Parser, Debug)]
#[command(name = "bear", version, about, long_about = None)]
pub struct Cli {
    /// Bear database file (overrides BEAR_DB_PATH and config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find notes by text, tag, date range, or pinned state
    Search(SearchArgs),

    /// Show a note's full content, including attachment text
    Open(OpenArgs),

    /// Create a new note
    Create(CreateArgs),

    /// Add text to the beginning or end of a note
    AddText(AddTextArgs),

    /// Attach a file to a note
    AddFile(AddFileArgs),

    /// Add tags to a note
    AddTag(AddTagArgs),

    /// Move a note to Bear's archive
    Archive(ArchiveArgs),

    /// Show the tag hierarchy with note counts
    Tags,

    /// List notes that have no tags
    Untagged(UntaggedArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `search` command
#[derive(Parser, Debug, Default)]
pub struct SearchArgs {
    /// Text to look for in titles, bodies, and attachment text
    pub term: Option<String>,

    /// Only notes with this tag or one of its descendants
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Created on or after (today, yesterday, last week, YYYY-MM-DD, ...)
    #[arg(long)]
    pub created_after: Option<String>,

    /// Created on or before
    #[arg(long)]
    pub created_before: Option<String>,

    /// Modified on or after
    #[arg(long)]
    pub modified_after: Option<String>,

    /// Modified on or before
    #[arg(long)]
    pub modified_before: Option<String>,

    /// Only pinned notes
    #[arg(long)]
    pub pinned: bool,
}

/// Arguments for the `open` command
#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Note identifier
    pub id: String,
}

/// Arguments for the `create` command
#[derive(Parser, Debug, Default)]
pub struct CreateArgs {
    /// Note title
    #[arg(long)]
    pub title: Option<String>,

    /// Markdown body (without a title heading)
    #[arg(long)]
    pub text: Option<String>,

    /// Comma-separated tags, e.g. "work,project/alpha"
    #[arg(long)]
    pub tags: Option<String>,
}

/// Arguments for the `add-text` command
#[derive(Parser, Debug)]
pub struct AddTextArgs {
    /// Note identifier
    pub id: String,

    /// Text to add
    pub text: String,

    /// Section header to insert under
    #[arg(long)]
    pub header: Option<String>,

    /// Where to insert
    #[arg(long, value_enum, default_value_t = InsertPosition::End)]
    pub position: InsertPosition,
}

/// Arguments for the `add-file` command
#[derive(Parser, Debug)]
pub struct AddFileArgs {
    /// File to attach ("-" reads from stdin)
    pub path: PathBuf,

    /// Target note identifier
    #[arg(long, required_unless_present = "title")]
    pub id: Option<String>,

    /// Target note title, when the identifier isn't known
    #[arg(long)]
    pub title: Option<String>,

    /// Attachment name (defaults to the file's name)
    #[arg(long)]
    pub filename: Option<String>,

    /// The input is already base64-encoded
    #[arg(long)]
    pub encoded: bool,
}

/// Arguments for the `add-tag` command
#[derive(Parser, Debug)]
pub struct AddTagArgs {
    /// Note identifier
    pub id: String,

    /// Tags to add, without '#'
    #[arg(required = true, num_args = 1..)]
    pub tags: Vec<String>,
}

/// Arguments for the `archive` command
#[derive(Parser, Debug)]
pub struct ArchiveArgs {
    /// Note identifier
    pub id: String,
}

/// Arguments for the `untagged` command
#[derive(Parser, Debug, Default)]
pub struct UntaggedArgs {
    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
