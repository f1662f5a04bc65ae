//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::ffi::OsString;

/// Fluent wrapper around `assert_cmd::Command` for the `bear` binary.
///
/// Ambient `RUST_LOG`, `BEAR_DB_PATH` and `BEAR_NOTES_CONFIG` are cleared so
/// only what the test sets is seen.
pub struct BearCommand {
    args: Vec<String>,
    envs: Vec<(String, OsString)>,
    stdin: Option<Vec<u8>>,
}

impl BearCommand {
    /// Creates a new command for the `bear` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
            stdin: None,
        }
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: impl Into<OsString>) -> Self {
        self.envs.push((key.to_string(), value.into()));
        self
    }

    /// Feeds bytes to the child's stdin.
    pub fn stdin(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(bytes.into());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("bear").expect("Failed to find bear binary");
        cmd.env_remove("RUST_LOG")
            .env_remove("BEAR_DB_PATH")
            .env_remove("BEAR_NOTES_CONFIG")
            .env_remove("BEAR_NOTES_DEBUG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(bytes) = self.stdin {
            cmd.write_stdin(bytes);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `search` command with a term.
    pub fn search(self, term: &str) -> Self {
        self.args(["search", term])
    }

    /// Configures for the `open` command with an ID.
    pub fn open(self, id: &str) -> Self {
        self.args(["open", id])
    }

    /// Configures for the `tags` command.
    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    /// Configures for the `untagged` command.
    pub fn untagged(self) -> Self {
        self.args(["untagged"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format ids` to the command.
    pub fn format_ids(self) -> Self {
        self.args(["--format", "ids"])
    }
}

impl Default for BearCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        BearCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = BearCommand::new().search("plan").format_json();
        assert_eq!(cmd.get_args(), ["search", "plan", "--format", "json"]);
    }
}
