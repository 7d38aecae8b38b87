//! Shareable URL parameters.
//!
//! A countdown is encoded as `?date=<YYYY-MM-DD>&time=<HH:MM>&title=<title>`.
//! The title is percent-encoded as a parameter value before the query string
//! itself is encoded, so it ends up encoded twice in the final link. Links
//! produced by the web version of the widget have the same shape, and
//! [`parse_query`] followed by
//! [`CountdownEngine::from_url_parameters`](crate::engine::CountdownEngine::from_url_parameters)
//! undoes both layers.

use std::borrow::Cow;

/// Parameter key for the target date.
pub const DATE_KEY: &str = "date";
/// Parameter key for the target time.
pub const TIME_KEY: &str = "time";
/// Parameter key for the title.
pub const TITLE_KEY: &str = "title";

/// An ordered list of URL query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    pairs: Vec<(String, String)>,
}

impl UrlParams {
    /// An empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing an existing entry in place or
    /// appending a new one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Whether no parameters are present.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the parameters as `k=v&k=v`, percent-encoding every value.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = UrlParams::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

/// Parses a query string such as `?date=2025-06-01&time=12%3A00`.
///
/// A leading `?` is optional, `+` decodes to a space, and pairs whose
/// percent-encoding is broken are skipped. When a key repeats, the first
/// occurrence wins.
pub fn parse_query(query: &str) -> UrlParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = UrlParams::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let (Some(key), Some(value)) = (
            decode_form_component(raw_key),
            decode_form_component(raw_value),
        ) else {
            continue;
        };
        if params.get(&key).is_none() {
            params.set(key, value);
        }
    }
    params
}

/// Builds a share link from a base URL and parameters.
///
/// Any query or fragment already present on `base` is dropped.
pub fn share_url(base: &str, params: &UrlParams) -> String {
    let end = base.find(['?', '#']).unwrap_or(base.len());
    let base = &base[..end];
    if params.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, params.to_query_string())
    }
}

/// Percent-encodes a single value.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Percent-decodes a single value. `+` is kept as is.
pub fn decode_component(value: &str) -> Option<String> {
    urlencoding::decode(value).ok().map(Cow::into_owned)
}

/// Percent-decodes a query string key or value, treating `+` as a space.
pub fn decode_form_component(value: &str) -> Option<String> {
    let value: Cow<'_, str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };
    urlencoding::decode(&value).ok().map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_insertion_order() {
        let mut params = UrlParams::new();
        params.set("date", "2025-06-01");
        params.set("time", "12:00");
        params.set("date", "2025-07-01");

        assert_eq!(params.get("date"), Some("2025-07-01"));
        assert_eq!(params.pairs()[0].0, "date");
        assert_eq!(params.pairs()[1].0, "time");
    }

    #[test]
    fn test_query_string_encoding() {
        let params = UrlParams::new()
            .with("date", "2025-06-01")
            .with("time", "12:00")
            .with("title", "New Year");
        assert_eq!(
            params.to_query_string(),
            "date=2025-06-01&time=12%3A00&title=New%20Year"
        );
    }

    #[test]
    fn test_parse_query() {
        let params = parse_query("?date=2025-06-01&time=12%3A00&title=Big+Day&title=ignored");
        assert_eq!(params.get("date"), Some("2025-06-01"));
        assert_eq!(params.get("time"), Some("12:00"));
        assert_eq!(params.get("title"), Some("Big Day"));
        assert_eq!(params.pairs().len(), 3);
    }

    #[test]
    fn test_parse_query_skips_broken_pairs() {
        let params = parse_query("date=2025-06-01&&bad=%FF%FE&flag");
        assert_eq!(params.get("date"), Some("2025-06-01"));
        assert_eq!(params.get("bad"), None);
        assert_eq!(params.get("flag"), Some(""));
    }

    #[test]
    fn test_plus_is_a_space_only_in_query_strings() {
        assert_eq!(decode_form_component("1+1").as_deref(), Some("1 1"));
        assert_eq!(decode_component("1+1").as_deref(), Some("1+1"));
        assert_eq!(decode_component("1%2B1").as_deref(), Some("1+1"));
        assert_eq!(decode_component("%FF"), None);
    }

    #[test]
    fn test_share_url_replaces_existing_query() {
        let params = UrlParams::new().with("date", "2025-06-01");
        assert_eq!(
            share_url("http://localhost:5173/index.html?old=1#top", &params),
            "http://localhost:5173/index.html?date=2025-06-01"
        );
        assert_eq!(
            share_url("http://localhost:5173/?x=1", &UrlParams::new()),
            "http://localhost:5173/"
        );
    }

    #[test]
    fn test_parse_reverses_query_string() {
        let params = UrlParams::new()
            .with("title", "Tết & friends = 100%")
            .with("time", "08:30");
        assert_eq!(parse_query(&params.to_query_string()), params);
    }
}
