//! Dispatching action URLs to the operating system.

use super::{ActionError, ActionResult, BearUrl};
use std::process::{Command, Stdio};

/// Hands a built action URL to something that can open it.
pub trait ActionRunner {
    fn run(&self, url: &BearUrl) -> ActionResult<()>;
}

impl<R: ActionRunner + ?Sized> ActionRunner for &R {
    fn run(&self, url: &BearUrl) -> ActionResult<()> {
        (**self).run(url)
    }
}

/// Opens URLs with the macOS `open` command and waits for it to exit.
#[derive(Debug, Clone)]
pub struct OpenCommand {
    program: String,
}

impl OpenCommand {
    pub fn new() -> Self {
        Self::with_program("open")
    }

    /// Uses a different launcher binary. Handy for tests.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for OpenCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionRunner for OpenCommand {
    fn run(&self, url: &BearUrl) -> ActionResult<()> {
        tracing::debug!(program = %self.program, %url, "launching Bear action");

        let output = Command::new(&self.program)
            .arg(url.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| {
                tracing::error!(program = %self.program, error = %source, "failed to spawn launcher");
                ActionError::Spawn {
                    program: self.program.clone(),
                    source,
                }
            })?;

        if output.status.success() {
            tracing::debug!(action = url.action(), "Bear action dispatched");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let code = output.status.code();
        tracing::error!(?code, stderr = stderr.trim(), "Bear action failed");
        Err(ActionError::Failed { code, stderr })
    }
}
