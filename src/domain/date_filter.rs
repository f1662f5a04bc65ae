//! Creation and modification date bounds for search.

use chrono::{DateTime, Local};

use super::date_phrase::{InvalidDateFormat, end_of_day, parse_date_phrase_at, start_of_day};

/// Raw date phrases as supplied by a caller, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatePhrases {
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub modified_after: Option<String>,
    pub modified_before: Option<String>,
}

impl DatePhrases {
    /// Returns true when no phrase is present.
    pub fn is_empty(&self) -> bool {
        [
            &self.created_after,
            &self.created_before,
            &self.modified_after,
            &self.modified_before,
        ]
        .iter()
        .all(|phrase| phrase.as_deref().is_none_or(|p| p.trim().is_empty()))
    }
}

/// Parsed date bounds. Absent fields impose no bound.
///
/// `*_after` bounds are inclusive from the start of the named day and
/// `*_before` bounds are inclusive through its last millisecond.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub created_after: Option<DateTime<Local>>,
    pub created_before: Option<DateTime<Local>>,
    pub modified_after: Option<DateTime<Local>>,
    pub modified_before: Option<DateTime<Local>>,
}

impl DateFilter {
    /// Parses every present phrase relative to the current local time.
    pub fn parse(phrases: &DatePhrases) -> Result<Self, InvalidDateFormat> {
        Self::parse_at(phrases, Local::now())
    }

    /// Parses every present phrase relative to `now`.
    ///
    /// Blank phrases are treated as absent.
    pub fn parse_at(phrases: &DatePhrases, now: DateTime<Local>) -> Result<Self, InvalidDateFormat> {
        let lower = |phrase: &Option<String>| bound(phrase, now, Edge::Start);
        let upper = |phrase: &Option<String>| bound(phrase, now, Edge::End);

        Ok(Self {
            created_after: lower(&phrases.created_after)?,
            created_before: upper(&phrases.created_before)?,
            modified_after: lower(&phrases.modified_after)?,
            modified_before: upper(&phrases.modified_before)?,
        })
    }

    /// Returns true when no bound is set.
    pub fn is_empty(&self) -> bool {
        self.created_after.is_none()
            && self.created_before.is_none()
            && self.modified_after.is_none()
            && self.modified_before.is_none()
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Start,
    End,
}

fn bound(
    phrase: &Option<String>,
    now: DateTime<Local>,
    edge: Edge,
) -> Result<Option<DateTime<Local>>, InvalidDateFormat> {
    let Some(phrase) = phrase.as_deref().filter(|p| !p.trim().is_empty()) else {
        return Ok(None);
    };

    let day = parse_date_phrase_at(phrase, now)?.date_naive();
    let snapped = match edge {
        Edge::Start => start_of_day(day),
        Edge::End => end_of_day(day),
    };

    snapped
        .map(Some)
        .ok_or_else(|| InvalidDateFormat {
            input: phrase.to_string(),
        })
}
