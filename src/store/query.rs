//! Search query composition.
//!
//! Each optional filter contributes one [`Predicate`]: a SQL fragment using
//! positional `?` placeholders plus the values bound to them. The composer
//! ANDs whatever predicates are present, so parameter order always follows
//! fragment order and no user input is ever spliced into SQL text.

use rusqlite::types::Value;

use super::schema::VISIBLE_NOTE;
use super::sqlite::TAG_WITHIN_FN;
use super::{StoreError, StoreResult};
use crate::domain::{DateFilter, TagPath, timestamp};

/// Number of rows returned when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Escape character used in every `LIKE` pattern.
const LIKE_ESCAPE: char = '\\';

// ===========================================
// Predicate
// ===========================================

/// A parameterized SQL condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    sql: String,
    params: Vec<Value>,
}

impl Predicate {
    /// Creates a predicate. The number of `?` in `sql` must match `params`.
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Conjunction of predicates.
#[derive(Debug, Clone, Default)]
pub struct Conjunction {
    predicates: Vec<Predicate>,
}

impl Conjunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds a predicate when present.
    pub fn and_maybe(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(p) => self.and(p),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Renders `(a) AND (b) ...`, or `1 = 1` when empty, with the bound
    /// values in placeholder order.
    pub fn render(&self) -> (String, Vec<Value>) {
        if self.predicates.is_empty() {
            return ("1 = 1".to_string(), Vec::new());
        }

        let sql = self
            .predicates
            .iter()
            .map(|p| format!("({})", p.sql))
            .collect::<Vec<_>>()
            .join(" AND ");
        let params = self
            .predicates
            .iter()
            .flat_map(|p| p.params.iter().cloned())
            .collect();
        (sql, params)
    }
}

// ===========================================
// Individual filters
// ===========================================

/// Escapes `%`, `_` and the escape character itself for use in `LIKE`.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring match on title and body, and optionally on
/// text extracted from attachments.
pub fn term_predicate(term: &str, include_attachments: bool) -> Predicate {
    let pattern = format!("%{}%", escape_like(term));
    let mut sql = String::from(
        "note.ZTITLE LIKE ? ESCAPE '\\' OR note.ZTEXT LIKE ? ESCAPE '\\'",
    );
    let mut params = vec![Value::Text(pattern.clone()), Value::Text(pattern.clone())];

    if include_attachments {
        sql.push_str(
            " OR EXISTS (SELECT 1 FROM ZSFNOTEFILE f
                         WHERE f.ZNOTE = note.Z_PK AND f.ZSEARCHTEXT LIKE ? ESCAPE '\\')",
        );
        params.push(Value::Text(pattern));
    }

    Predicate::new(sql, params)
}

/// Matches notes tagged with exactly `tag` or with any path beneath it.
///
/// Stored names go through the same normalization as [`TagPath`], and a
/// descendant needs the `/` separator so `work` never matches `workshop`.
pub fn tag_predicate(tag: &TagPath) -> Predicate {
    Predicate::new(
        format!(
            "EXISTS (SELECT 1 FROM Z_5TAGS nt
                     JOIN ZSFNOTETAG t ON t.Z_PK = nt.Z_13TAGS
                     WHERE nt.Z_5NOTES = note.Z_PK
                       AND {TAG_WITHIN_FN}(?, t.ZTITLE))"
        ),
        vec![Value::Text(tag.as_str().to_string())],
    )
}

/// Date-bound predicates, one per bound present.
///
/// Lower bounds compare `>=` against the bound's store seconds. Upper bounds
/// are inclusive through their last millisecond, which in whole store
/// seconds is `< bound + 1`.
pub fn date_predicates(filter: &DateFilter) -> Vec<Predicate> {
    let lower = |column: &str, bound: &Option<chrono::DateTime<chrono::Local>>| {
        bound.map(|b| {
            Predicate::new(
                format!("note.{column} >= ?"),
                vec![Value::Integer(timestamp::to_store_seconds(&b))],
            )
        })
    };
    let upper = |column: &str, bound: &Option<chrono::DateTime<chrono::Local>>| {
        bound.map(|b| {
            Predicate::new(
                format!("note.{column} < ?"),
                vec![Value::Integer(timestamp::to_store_seconds(&b) + 1)],
            )
        })
    };

    [
        lower("ZCREATIONDATE", &filter.created_after),
        upper("ZCREATIONDATE", &filter.created_before),
        lower("ZMODIFICATIONDATE", &filter.modified_after),
        upper("ZMODIFICATIONDATE", &filter.modified_before),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Restricts to pinned notes.
pub fn pinned_predicate() -> Predicate {
    Predicate::new("note.ZPINNED = 1", Vec::new())
}

// ===========================================
// SearchQuery
// ===========================================

/// Search filters. All present filters must hold.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub term: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<usize>,
    pub dates: DateFilter,
    pub pinned_only: bool,
}

impl SearchQuery {
    /// Returns the trimmed term, if non-blank.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Returns the normalized tag path, if non-blank.
    ///
    /// A leading `#` is accepted and ignored.
    pub fn tag(&self) -> Option<TagPath> {
        self.tag
            .as_deref()
            .and_then(|t| TagPath::new(t.trim().trim_start_matches('#')))
    }

    /// Returns the effective row limit. Zero falls back to the default.
    pub fn limit(&self) -> usize {
        match self.limit {
            Some(0) | None => DEFAULT_SEARCH_LIMIT,
            Some(n) => n,
        }
    }

    /// Returns true when at least one filter is present.
    pub fn has_criteria(&self) -> bool {
        self.term().is_some() || self.tag().is_some() || !self.dates.is_empty() || self.pinned_only
    }

    /// Composes the SQL for this query.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingSearchCriteria` if no filter is present.
    pub fn compose(&self, include_attachments: bool) -> StoreResult<ComposedQuery> {
        if !self.has_criteria() {
            return Err(StoreError::MissingSearchCriteria);
        }

        let mut filters = Conjunction::new()
            .and(Predicate::new(VISIBLE_NOTE, Vec::new()))
            .and_maybe(self.term().map(|t| term_predicate(t, include_attachments)))
            .and_maybe(self.tag().map(|t| tag_predicate(&t)));
        for predicate in date_predicates(&self.dates) {
            filters = filters.and(predicate);
        }
        if self.pinned_only {
            filters = filters.and(pinned_predicate());
        }

        let (where_clause, mut params) = filters.render();
        let limit = self.limit();
        params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));

        // COUNT(*) OVER () is evaluated before LIMIT, so every returned row
        // carries the full match count from the same pass.
        let sql = format!(
            "SELECT note.ZUNIQUEIDENTIFIER AS identifier,
                    note.ZTITLE AS title,
                    note.ZCREATIONDATE AS created,
                    note.ZMODIFICATIONDATE AS modified,
                    note.ZPINNED AS pinned,
                    COUNT(*) OVER () AS total_count
             FROM ZSFNOTE note
             WHERE {where_clause}
             ORDER BY note.ZMODIFICATIONDATE DESC, note.Z_PK ASC
             LIMIT ?"
        );

        Ok(ComposedQuery { sql, params, limit })
    }
}

/// SQL and bound values ready to execute.
#[derive(Debug, Clone)]
pub struct ComposedQuery {
    pub sql: String,
    pub params: Vec<Value>,
    pub limit: usize,
}
