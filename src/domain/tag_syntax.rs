//! Bear inline tag markup.
//!
//! Bear recognizes `#tag` and `#nested/tag` inline. Tags containing spaces
//! need a closing hash (`#multi word#`) so Bear knows where they end.

/// Separator placed between the tag line and the note body.
pub const TAG_LINE_SEPARATOR: &str = "\n---\n";

/// Encodes a comma-separated tag list as a single line of inline tags.
///
/// Segments are trimmed, stray leading/trailing `#` are stripped, and empty
/// segments are dropped. Returns `None` when nothing survives.
///
/// ```
/// use bear_notes::domain::encode_tag_line;
///
/// assert_eq!(encode_tag_line(Some("work, my tag")).as_deref(), Some("#work #my tag#"));
/// assert_eq!(encode_tag_line(Some("###,,,")), None);
/// ```
pub fn encode_tag_line(raw: Option<&str>) -> Option<String> {
    let raw = raw?;

    let encoded: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(encode_tag)
        .collect();

    if encoded.is_empty() {
        None
    } else {
        Some(encoded.join(" "))
    }
}

/// Encodes one tag, or `None` if it is empty once hashes are stripped.
pub fn encode_tag(raw: &str) -> Option<String> {
    let cleaned = raw.trim().trim_matches('#').trim();
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.contains(' ') {
        Some(format!("#{cleaned}#"))
    } else {
        Some(format!("#{cleaned}"))
    }
}

/// Joins an optional tag line with an optional body.
///
/// Both present: `"{tags}\n---\n{body}"`. Only one present: that one,
/// unmodified. A blank body counts as absent.
pub fn compose_body(tag_line: Option<&str>, body: Option<&str>) -> Option<String> {
    let body = body.filter(|b| !b.trim().is_empty());

    match (tag_line, body) {
        (Some(tags), Some(body)) => Some(format!("{tags}{TAG_LINE_SEPARATOR}{body}")),
        (Some(tags), None) => Some(tags.to_string()),
        (None, Some(body)) => Some(body.to_string()),
        (None, None) => None,
    }
}
