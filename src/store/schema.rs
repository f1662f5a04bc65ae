//! The slice of Bear's Core Data schema this crate reads.
//!
//! Bear owns the database; this crate only ever issues `SELECT`s against
//! it. [`create_fixture_schema`] recreates the same tables in an empty
//! database so tests and benchmarks can exercise the real queries.

use rusqlite::Connection;

/// Notes table.
pub const NOTE_TABLE: &str = "ZSFNOTE";
/// Attachments table, joined on `ZNOTE = ZSFNOTE.Z_PK`.
pub const FILE_TABLE: &str = "ZSFNOTEFILE";
/// Tags table.
pub const TAG_TABLE: &str = "ZSFNOTETAG";
/// Note/tag junction: `Z_5NOTES` references notes, `Z_13TAGS` tags.
pub const NOTE_TAG_TABLE: &str = "Z_5TAGS";

/// Predicate every read applies: archived, trashed and encrypted notes are
/// invisible.
pub const VISIBLE_NOTE: &str = "note.ZARCHIVED = 0 AND note.ZTRASHED = 0 AND note.ZENCRYPTED = 0";

/// Creates empty copies of the tables read by this crate.
///
/// Only used to build fixture stores; production code never writes.
pub fn create_fixture_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS ZSFNOTE (
            Z_PK INTEGER PRIMARY KEY,
            ZUNIQUEIDENTIFIER VARCHAR,
            ZTITLE VARCHAR,
            ZTEXT VARCHAR,
            ZCREATIONDATE TIMESTAMP,
            ZMODIFICATIONDATE TIMESTAMP,
            ZPINNED INTEGER DEFAULT 0,
            ZARCHIVED INTEGER DEFAULT 0,
            ZTRASHED INTEGER DEFAULT 0,
            ZENCRYPTED INTEGER DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS ZSFNOTEFILE (
            Z_PK INTEGER PRIMARY KEY,
            ZNOTE INTEGER,
            ZFILENAME VARCHAR,
            ZSEARCHTEXT VARCHAR
        );

        CREATE TABLE IF NOT EXISTS ZSFNOTETAG (
            Z_PK INTEGER PRIMARY KEY,
            ZTITLE VARCHAR,
            ZISROOT INTEGER DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS Z_5TAGS (
            Z_5NOTES INTEGER,
            Z_13TAGS INTEGER,
            PRIMARY KEY (Z_5NOTES, Z_13TAGS)
        );",
    )
}
