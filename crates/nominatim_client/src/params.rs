//! Query string encoding
//!
//! Values are escaped as URI components: everything outside the unreserved
//! set (`A-Z`, `a-z`, `0-9`, `-`, `_`, `.`, `~`) becomes `%XX` over its UTF-8
//! bytes, so a space is `%20` and `&`/`=` can never split a pair.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single query value
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Ordered set of query parameters for one request
///
/// Names are fixed identifiers and are emitted verbatim. Absent and empty
/// values are skipped when encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, Option<String>)>,
}

impl QueryParams {
    /// Create an empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter that is always sent (unless empty)
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.pairs.push((name, Some(value.into())));
        self
    }

    /// Append an optional parameter
    pub fn push_opt<T: ToString>(&mut self, name: &'static str, value: Option<T>) -> &mut Self {
        self.pairs.push((name, value.map(|v| v.to_string())));
        self
    }

    /// Append an optional `1`/`0` flag
    pub fn push_flag(&mut self, name: &'static str, value: Option<bool>) -> &mut Self {
        self.push_opt(name, value.map(|on| if on { "1" } else { "0" }))
    }

    /// Parameters that will actually be sent, in insertion order
    pub fn present(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.pairs.iter().filter_map(|(name, value)| match value {
            Some(v) if !v.is_empty() => Some((*name, v.as_str())),
            _ => None,
        })
    }

    /// Number of parameters that will be sent
    pub fn len(&self) -> usize {
        self.present().count()
    }

    /// True when encoding yields an empty string
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Encode as `?name=value&...`, or `""` when nothing is present
    pub fn encode(&self) -> String {
        let mut query = String::new();
        for (name, value) in self.present() {
            query.push(if query.is_empty() { '?' } else { '&' });
            query.push_str(name);
            query.push('=');
            query.push_str(&encode_component(value));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_unreserved_chars() {
        assert_eq!(encode_component("abc-123_test.file~v2"), "abc-123_test.file~v2");
    }

    #[test]
    fn encode_space_as_percent() {
        assert_eq!(encode_component("Eiffel Tower"), "Eiffel%20Tower");
    }

    #[test]
    fn encode_reserved_chars() {
        assert_eq!(encode_component("a&b=c?d/e"), "a%26b%3Dc%3Fd%2Fe");
        assert_eq!(encode_component("N123,W456"), "N123%2CW456");
        assert_eq!(encode_component("100%"), "100%25");
    }

    #[test]
    fn encode_unicode() {
        assert_eq!(encode_component("München"), "M%C3%BCnchen");
    }

    #[test]
    fn empty_set_encodes_to_empty_string() {
        let params = QueryParams::new();
        assert_eq!(params.encode(), "");
        assert!(params.is_empty());
    }

    #[test]
    fn only_absent_values_encode_to_empty_string() {
        let mut params = QueryParams::new();
        params
            .push("q", "")
            .push_opt::<u32>("limit", None)
            .push_flag("bounded", None);
        assert_eq!(params.encode(), "");
        assert_eq!(params.len(), 0);
    }

    #[test]
    fn pairs_keep_insertion_order() {
        let mut params = QueryParams::new();
        params
            .push("q", "Paris")
            .push("format", "json")
            .push_opt("limit", Some(5));
        assert_eq!(params.encode(), "?q=Paris&format=json&limit=5");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn empty_values_are_skipped_without_stray_separators() {
        let mut params = QueryParams::new();
        params
            .push("a", "")
            .push("b", "1")
            .push_opt("c", Some(""))
            .push("d", "2")
            .push("e", "");
        assert_eq!(params.encode(), "?b=1&d=2");
    }

    #[test]
    fn flags_encode_as_digits() {
        let mut params = QueryParams::new();
        params.push_flag("addressdetails", Some(true));
        params.push_flag("bounded", Some(false));
        assert_eq!(params.encode(), "?addressdetails=1&bounded=0");
    }

    #[test]
    fn values_are_escaped_inside_pairs() {
        let mut params = QueryParams::new();
        params.push("q", "fish & chips=good");
        assert_eq!(params.encode(), "?q=fish%20%26%20chips%3Dgood");
    }
}
