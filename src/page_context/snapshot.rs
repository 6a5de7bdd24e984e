use url::Url;

use super::{Query, SearchEngine};

/// Read-only view of the host page: its location and serialized document.
///
/// The document stays a string here. It is parsed on demand inside
/// synchronous extraction, so parsed trees never live across an await.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    url: Url,
    html: String,
}

impl PageSnapshot {
    #[must_use]
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
        }
    }

    /// Parse `url` and wrap it with `html`.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an absolute URL.
    pub fn parse(url: &str, html: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(url)?, html))
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn engine(&self) -> SearchEngine {
        SearchEngine::detect(&self.url)
    }

    #[must_use]
    pub fn query(&self) -> Option<Query> {
        Query::extract(&self.url)
    }
}
