//! Bear x-callback-url construction.

use super::{ActionError, ActionResult};
use std::fmt;
use url::form_urlencoded;

/// Scheme and host every Bear action URL starts with.
pub const BEAR_URL_SCHEME: &str = "bear://x-callback-url/";

/// A Bear action with its query parameters in insertion order.
///
/// Blank values are dropped and the rest are trimmed, so callers can pass
/// optional user input straight through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearUrl {
    action: String,
    params: Vec<(&'static str, String)>,
}

impl BearUrl {
    pub fn new(action: &str) -> ActionResult<Self> {
        let action = action.trim();
        if action.is_empty() {
            return Err(ActionError::InvalidAction);
        }
        Ok(Self {
            action: action.to_string(),
            params: Vec::new(),
        })
    }

    /// Sets `key` to the trimmed value, or skips it when absent or blank.
    ///
    /// Setting a key twice keeps its original position with the new value.
    pub fn param(mut self, key: &'static str, value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return self;
        };
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.params.push((key, value.to_string())),
        }
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the query string with `%20` for spaces.
    fn query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            serializer.append_pair(key, value);
        }
        if self.action == "add-text" && self.get("new_line").is_none() {
            serializer.append_pair("new_line", "yes");
        }
        // Literal plus signs are already %2B, so every remaining '+' is a space.
        serializer.finish().replace('+', "%20")
    }
}

impl fmt::Display for BearUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{BEAR_URL_SCHEME}{}?{}", self.action, self.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encodes_spaces_as_percent_twenty() {
        let url = BearUrl::new("create").unwrap().param("title", Some("Hello World"));
        assert_eq!(url.to_string(), "bear://x-callback-url/create?title=Hello%20World");
    }

    #[test]
    fn encodes_literal_plus() {
        let url = BearUrl::new("create").unwrap().param("title", Some("1+1=2"));
        assert_eq!(url.to_string(), "bear://x-callback-url/create?title=1%2B1%3D2");
    }

    #[test]
    fn encodes_reserved_characters() {
        let url = BearUrl::new("create")
            .unwrap()
            .param("text", Some("a&b #tag/x?"));
        assert_eq!(
            url.to_string(),
            "bear://x-callback-url/create?text=a%26b%20%23tag%2Fx%3F"
        );
    }

    #[test]
    fn skips_blank_and_absent_values() {
        let url = BearUrl::new("create")
            .unwrap()
            .param("title", Some("   "))
            .param("text", None)
            .param("tags", Some("work"));
        assert_eq!(url.to_string(), "bear://x-callback-url/create?tags=work");
    }

    #[test]
    fn trims_values() {
        let url = BearUrl::new("create").unwrap().param("title", Some("  Plan  "));
        assert_eq!(url.get("title"), Some("Plan"));
    }

    #[test]
    fn keeps_insertion_order() {
        let url = BearUrl::new("add-file")
            .unwrap()
            .param("id", Some("ABC"))
            .param("file", Some("AAAA"))
            .param("filename", Some("a.txt"))
            .param("mode", Some("append"));
        assert_eq!(
            url.to_string(),
            "bear://x-callback-url/add-file?id=ABC&file=AAAA&filename=a.txt&mode=append"
        );
    }

    #[test]
    fn resetting_a_key_keeps_its_position() {
        let url = BearUrl::new("create")
            .unwrap()
            .param("title", Some("one"))
            .param("text", Some("body"))
            .param("title", Some("two"));
        assert_eq!(url.to_string(), "bear://x-callback-url/create?title=two&text=body");
    }

    #[test]
    fn add_text_always_carries_new_line() {
        let url = BearUrl::new("add-text")
            .unwrap()
            .param("id", Some("ABC"))
            .param("text", Some("hi"))
            .param("mode", Some("append"));
        assert_eq!(
            url.to_string(),
            "bear://x-callback-url/add-text?id=ABC&text=hi&mode=append&new_line=yes"
        );
    }

    #[test]
    fn other_actions_have_no_new_line() {
        let url = BearUrl::new("archive").unwrap().param("id", Some("ABC"));
        assert!(!url.to_string().contains("new_line"));
    }

    #[test]
    fn empty_action_is_rejected() {
        assert!(matches!(BearUrl::new("  "), Err(ActionError::InvalidAction)));
    }

    #[test]
    fn action_name_is_trimmed() {
        let url = BearUrl::new(" create ").unwrap();
        assert_eq!(url.action(), "create");
        assert_eq!(url.to_string(), "bear://x-callback-url/create?");
    }

    #[test]
    fn encodes_unicode() {
        let url = BearUrl::new("create").unwrap().param("title", Some("café"));
        assert_eq!(url.to_string(), "bear://x-callback-url/create?title=caf%C3%A9");
    }
}
