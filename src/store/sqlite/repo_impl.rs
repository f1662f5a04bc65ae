//! NoteStore trait implementation for BearStore.

use super::BearStore;
use crate::domain::{Note, TagCount, TagPath, build_tag_tree};
use crate::store::query::DEFAULT_SEARCH_LIMIT;
use crate::store::row::{JoinedRow, NoteRow, map_note, map_note_with_attachments};
use crate::store::{NoteStore, SearchPage, SearchQuery, StoreResult, TagTree, validate_identifier};
use std::collections::HashSet;

impl NoteStore for BearStore {
    fn get_note(&self, identifier: &str) -> StoreResult<Option<Note>> {
        let identifier = validate_identifier(identifier)?;

        tracing::debug!(identifier, "fetching note content");

        let mut stmt = self.conn.prepare(
            "SELECT note.ZUNIQUEIDENTIFIER AS identifier,
                    note.ZTITLE AS title,
                    note.ZCREATIONDATE AS created,
                    note.ZMODIFICATIONDATE AS modified,
                    note.ZPINNED AS pinned,
                    note.ZTEXT AS text,
                    f.ZFILENAME AS filename,
                    f.ZSEARCHTEXT AS file_text
             FROM ZSFNOTE note
             LEFT JOIN ZSFNOTEFILE f ON f.ZNOTE = note.Z_PK
             WHERE note.ZUNIQUEIDENTIFIER = ?
               AND note.ZARCHIVED = 0 AND note.ZTRASHED = 0 AND note.ZENCRYPTED = 0
             ORDER BY f.Z_PK",
        )?;

        let rows: Vec<JoinedRow> = stmt
            .query_map([identifier], JoinedRow::from_row)?
            .collect::<Result<_, _>>()?;

        if rows.is_empty() {
            tracing::info!(identifier, "note not found");
            return Ok(None);
        }

        let note = map_note_with_attachments(&rows)?;
        tracing::info!(
            identifier,
            attachments = rows.iter().filter(|r| r.filename.is_some()).count(),
            "retrieved note content"
        );
        Ok(Some(note))
    }

    fn search(&self, query: &SearchQuery) -> StoreResult<SearchPage> {
        let composed = query.compose(self.search_attachments)?;
        tracing::debug!(
            params = composed.params.len(),
            limit = composed.limit,
            include_attachments = self.search_attachments,
            "executing search query"
        );

        let mut stmt = self.conn.prepare(&composed.sql)?;
        let rows: Vec<(NoteRow, i64)> = stmt
            .query_map(rusqlite::params_from_iter(composed.params.iter()), |row| {
                Ok((NoteRow::from_row(row)?, row.get::<_, i64>("total_count")?))
            })?
            .collect::<Result<_, _>>()?;

        let page = collect_page(rows)?;
        tracing::info!(
            returned = page.notes().len(),
            total = page.total_matching(),
            "search complete"
        );
        Ok(page)
    }

    fn list_tags(&self) -> StoreResult<TagTree> {
        let mut stmt = self.conn.prepare(
            "SELECT t.ZTITLE AS name,
                    COUNT(note.Z_PK) AS note_count
             FROM ZSFNOTETAG t
             LEFT JOIN Z_5TAGS nt ON nt.Z_13TAGS = t.Z_PK
             LEFT JOIN ZSFNOTE note ON note.Z_PK = nt.Z_5NOTES
                  AND note.ZARCHIVED = 0 AND note.ZTRASHED = 0 AND note.ZENCRYPTED = 0
             GROUP BY t.Z_PK
             ORDER BY t.ZTITLE",
        )?;

        let rows: Vec<(Option<String>, u32)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<_, _>>()?;

        let row_count = rows.len();
        let flat = rows.into_iter().filter_map(|(name, count)| {
            let path = name.as_deref().and_then(TagPath::new);
            if path.is_none() {
                tracing::debug!(?name, "skipping tag with blank name");
            }
            path.map(|p| TagCount::new(p, count))
        });

        let tree = TagTree::new(build_tag_tree(flat));
        tracing::info!(
            rows = row_count,
            tags = tree.total(),
            roots = tree.roots().len(),
            "built tag tree"
        );
        Ok(tree)
    }

    fn find_untagged(&self, limit: Option<usize>) -> StoreResult<SearchPage> {
        let limit = limit.filter(|&n| n > 0).unwrap_or(DEFAULT_SEARCH_LIMIT);

        let mut stmt = self.conn.prepare(
            "SELECT note.ZUNIQUEIDENTIFIER AS identifier,
                    note.ZTITLE AS title,
                    note.ZCREATIONDATE AS created,
                    note.ZMODIFICATIONDATE AS modified,
                    COUNT(*) OVER () AS total_count
             FROM ZSFNOTE note
             WHERE note.ZARCHIVED = 0 AND note.ZTRASHED = 0 AND note.ZENCRYPTED = 0
               AND NOT EXISTS (SELECT 1 FROM Z_5TAGS nt WHERE nt.Z_5NOTES = note.Z_PK)
             ORDER BY note.ZMODIFICATIONDATE DESC, note.Z_PK ASC
             LIMIT ?",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<(NoteRow, i64)> = stmt
            .query_map([limit], |row| {
                Ok((NoteRow::from_row(row)?, row.get::<_, i64>("total_count")?))
            })?
            .collect::<Result<_, _>>()?;

        let page = collect_page(rows)?;
        tracing::info!(
            returned = page.notes().len(),
            total = page.total_matching(),
            "found untagged notes"
        );
        Ok(page)
    }
}

/// Maps limited rows into a page, keeping the first row per identifier.
///
/// The window count is the same on every row; with no rows the total is zero.
fn collect_page(rows: Vec<(NoteRow, i64)>) -> StoreResult<SearchPage> {
    let total = rows
        .first()
        .map(|(_, total)| usize::try_from(*total).unwrap_or(0))
        .unwrap_or(0);

    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(rows.len());
    for (row, _) in &rows {
        let note = map_note(row)?;
        if seen.insert(note.identifier().to_string()) {
            notes.push(note);
        } else {
            tracing::debug!(identifier = note.identifier(), "dropping duplicate row");
        }
    }

    Ok(SearchPage::new(notes, total.max(seen.len())))
}
