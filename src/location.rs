//! The address a countdown is shared under.
//!
//! In a browser this is the page URL: the widget reads the query once at load
//! and rewrites it with history replacement whenever a countdown starts or is
//! reset. A terminal host keeps the same contract through [`Location`].

use std::fmt;

use crate::share::{parse_query, share_url, UrlParams};

/// Base URL used for share links when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/";

/// Current address of the widget.
pub trait Location: fmt::Debug + Send {
    /// Address without query or fragment.
    fn base_url(&self) -> String;

    /// Current query string, without the leading `?`. Empty when none.
    fn query(&self) -> String;

    /// Replaces the current query in place, without adding a history entry.
    /// An empty `query` clears it.
    fn replace_query(&mut self, query: &str);

    /// Current query parsed into parameters.
    fn params(&self) -> UrlParams {
        parse_query(&self.query())
    }

    /// Full address including the current query.
    fn href(&self) -> String {
        share_url(&self.base_url(), &self.params())
    }
}

/// A location held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    base_url: String,
    query: String,
    /// Number of in-place replacements so far.
    pub replacements: usize,
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MemoryLocation {
    /// A location at `base_url` with no query.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            query: String::new(),
            replacements: 0,
        }
    }

    /// A location parsed from a full URL such as a pasted share link.
    pub fn from_url(url: &str) -> Self {
        let without_fragment = url.split('#').next().unwrap_or(url);
        let (base, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));
        Self {
            base_url: base.to_string(),
            query: query.to_string(),
            replacements: 0,
        }
    }
}

impl Location for MemoryLocation {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: &str) {
        self.query = query.trim_start_matches('?').to_string();
        self.replacements += 1;
    }
}
