//! Isolated fixture library in a temp directory.

// Allow dead code since this is a test utility shared across test binaries
#![allow(dead_code)]

use super::{BearCommand, TestNote};
use bear_notes::domain::timestamp::to_store_seconds;
use bear_notes::store::schema::create_fixture_schema;
use rusqlite::{Connection, OptionalExtension, params};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A fixture Bear database plus an isolated config file.
///
/// Everything lives in a temp directory that is removed on drop. Commands
/// built with [`TestEnv::cmd`] point at this database through
/// `BEAR_DB_PATH` and at this config through `BEAR_NOTES_CONFIG`.
pub struct TestEnv {
    _temp_dir: TempDir,
    root: PathBuf,
    next_pk: Cell<i64>,
}

impl TestEnv {
    /// Creates an environment with an empty Bear schema.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        let env = Self {
            _temp_dir: temp_dir,
            root,
            next_pk: Cell::new(1),
        };
        let conn = Connection::open(env.db_path()).expect("Failed to create fixture database");
        create_fixture_schema(&conn).expect("Failed to create fixture schema");
        env
    }

    /// Returns the temp directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the fixture database.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("database.sqlite")
    }

    /// Path of the isolated config file (may not exist).
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Writes the config file.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Uses `program` instead of `open` to dispatch action URLs.
    pub fn use_launcher(&self, program: &str) {
        self.write_config(&format!("launcher = \"{program}\"\n"));
    }

    /// Writes a file into the environment and returns its path.
    pub fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Inserts a note with its tags and attachments.
    pub fn add_note(&self, note: &TestNote) {
        let conn = Connection::open(self.db_path()).expect("Failed to open fixture database");
        let pk = self.next_pk.get();
        self.next_pk.set(pk + 1);
        let (pinned, archived, trashed) = note.flags();

        conn.execute(
            "INSERT INTO ZSFNOTE (Z_PK, ZUNIQUEIDENTIFIER, ZTITLE, ZTEXT, ZCREATIONDATE,
                                  ZMODIFICATIONDATE, ZPINNED, ZARCHIVED, ZTRASHED)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                pk,
                note.note_id(),
                note.title(),
                note.get_text(),
                to_store_seconds(&note.created()) as f64,
                to_store_seconds(&note.modified_at()) as f64,
                pinned,
                archived,
                trashed,
            ],
        )
        .expect("Failed to insert note");

        for (filename, text) in note.attachments() {
            conn.execute(
                "INSERT INTO ZSFNOTEFILE (ZNOTE, ZFILENAME, ZSEARCHTEXT) VALUES (?1, ?2, ?3)",
                params![pk, filename, text],
            )
            .expect("Failed to insert attachment");
        }

        for tag in note.tags() {
            let tag_pk = tag_pk(&conn, tag);
            conn.execute(
                "INSERT INTO Z_5TAGS (Z_5NOTES, Z_13TAGS) VALUES (?1, ?2)",
                params![pk, tag_pk],
            )
            .expect("Failed to link tag");
        }
    }

    /// Creates a command configured for this environment.
    pub fn cmd(&self) -> BearCommand {
        BearCommand::new()
            .env("BEAR_DB_PATH", self.db_path())
            .env("BEAR_NOTES_CONFIG", self.config_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn tag_pk(conn: &Connection, name: &str) -> i64 {
    let existing: Option<i64> = conn
        .query_row("SELECT Z_PK FROM ZSFNOTETAG WHERE ZTITLE = ?1", [name], |row| {
            row.get(0)
        })
        .optional()
        .expect("Failed to look up tag");
    if let Some(pk) = existing {
        return pk;
    }
    conn.execute(
        "INSERT INTO ZSFNOTETAG (ZTITLE, ZISROOT) VALUES (?1, ?2)",
        params![name, !name.contains('/')],
    )
    .expect("Failed to insert tag");
    conn.last_insert_rowid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_database() {
        let env = TestEnv::new();
        assert!(env.db_path().exists());
        assert!(!env.config_path().exists());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_shares_tags() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("One").tag("work"));
        env.add_note(&TestNote::new("Two").tag("work"));

        let conn = Connection::open(env.db_path()).unwrap();
        let tags: i64 = conn
            .query_row("SELECT COUNT(*) FROM ZSFNOTETAG", [], |row| row.get(0))
            .unwrap();
        let links: i64 = conn
            .query_row("SELECT COUNT(*) FROM Z_5TAGS", [], |row| row.get(0))
            .unwrap();
        assert_eq!(tags, 1);
        assert_eq!(links, 2);
    }
}
