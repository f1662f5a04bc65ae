//! Error types for URL-scheme actions.

use crate::store::StoreError;
use thiserror::Error;

/// Errors raised while building or dispatching a Bear action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action error: action name must not be empty")]
    InvalidAction,

    #[error("action error: {0} is required")]
    MissingInput(&'static str),

    #[error("action error: note with ID '{id}' not found (it may be deleted, archived, or the ID may be incorrect)")]
    NoteNotFound { id: String },

    #[error("action error: failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "action error: failed to execute x-callback-url (exit code: {}){}",
        exit_code(.code),
        stderr_suffix(.stderr)
    )]
    Failed { code: Option<i32>, stderr: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Result type for action operations.
pub type ActionResult<T> = Result<T, ActionError>;
