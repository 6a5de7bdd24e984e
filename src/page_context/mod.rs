//! Page context detection
//!
//! Identifies which search engine rendered the current page and which query
//! the user searched for, using only the page's location. No DOM access.

mod snapshot;

pub use snapshot::PageSnapshot;

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Search engines with a dedicated extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    Google,
    Bing,
    DuckDuckGo,
    Unknown,
}

/// Ordered host rules. First match wins.
const ENGINE_RULES: &[(&str, SearchEngine)] = &[
    ("google.com", SearchEngine::Google),
    ("bing.com", SearchEngine::Bing),
    ("duckduckgo.com", SearchEngine::DuckDuckGo),
];

/// Query parameters carrying the search terms, in lookup order.
const QUERY_PARAMS: &[&str] = &["q", "query"];

impl SearchEngine {
    /// Detect the engine from the page's host.
    ///
    /// Pure substring match on the host name against the fixed rule list;
    /// anything else, including URLs without a host, is `Unknown`.
    #[must_use]
    pub fn detect(url: &Url) -> Self {
        let Some(host) = url.host_str() else {
            return Self::Unknown;
        };
        let host = host.to_ascii_lowercase();

        ENGINE_RULES
            .iter()
            .find(|(needle, _)| host.contains(needle))
            .map_or(Self::Unknown, |(_, engine)| *engine)
    }

    #[must_use]
    pub fn is_supported(self) -> bool {
        self != Self::Unknown
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty search query.
///
/// Absence is modeled as `Option<Query>`; an empty `Query` cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query(String);

impl Query {
    /// Trim `raw` and wrap it, or `None` if nothing is left.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Extract the query from the page location.
    ///
    /// Reads `q`, then `query`. An empty `q` falls through to `query`, the
    /// same way a browser `get('q') || get('query')` would behave.
    #[must_use]
    pub fn extract(url: &Url) -> Option<Self> {
        QUERY_PARAMS.iter().find_map(|param| {
            url.query_pairs()
                .find(|(key, _)| key == param)
                .and_then(|(_, value)| Self::new(value))
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Query {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("query cannot be empty")
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Detect the engine for `url`.
#[must_use]
pub fn detect_engine(url: &Url) -> SearchEngine {
    SearchEngine::detect(url)
}

/// Extract the active query from `url`, if any.
#[must_use]
pub fn extract_query(url: &Url) -> Option<Query> {
    Query::extract(url)
}
