//! Engine-specific structural selectors
//!
//! Each engine ships several DOM variants at once (A/B tests, layout
//! revisions), so every field has an ordered fallback chain instead of a
//! single selector. The first selector in a chain that matches inside a card
//! wins for that field.

use std::sync::LazyLock;

use scraper::Selector;

use crate::page_context::SearchEngine;

/// Selector text for one engine.
#[derive(Debug, Clone, Copy)]
pub struct SelectorSpec {
    /// Selector list matching one visible result card.
    pub cards: &'static str,
    pub title: &'static [&'static str],
    pub link: &'static [&'static str],
    pub snippet: &'static [&'static str],
}

pub const GOOGLE: SelectorSpec = SelectorSpec {
    cards: "div.g, div[data-hveid]",
    title: &["h3", "[role='heading']"],
    link: &["a[href]"],
    snippet: &["div[data-sncf]", "div.VwiC3b", "span.st"],
};

pub const BING: SelectorSpec = SelectorSpec {
    cards: "li.b_algo",
    title: &["h2 a", "h2"],
    link: &["h2 a[href]", "a.tilk[href]"],
    snippet: &["div.b_caption p", "p"],
};

pub const DUCKDUCKGO: SelectorSpec = SelectorSpec {
    cards: "article[data-testid='result']",
    title: &["h2 a", "[data-testid='result-title-a']"],
    link: &["h2 a[href]", "a[data-testid='result-title-a'][href]"],
    snippet: &["[data-result='snippet']", "div.result__snippet"],
};

/// Parsed form of a [`SelectorSpec`].
#[derive(Debug)]
pub struct Strategy {
    pub(crate) engine: SearchEngine,
    pub(crate) cards: Selector,
    pub(crate) title: Vec<Selector>,
    pub(crate) link: Vec<Selector>,
    pub(crate) snippet: Vec<Selector>,
}

impl Strategy {
    fn compile(engine: SearchEngine, spec: &SelectorSpec) -> Self {
        Self {
            engine,
            cards: parse(spec.cards),
            title: spec.title.iter().map(|s| parse(s)).collect(),
            link: spec.link.iter().map(|s| parse(s)).collect(),
            snippet: spec.snippet.iter().map(|s| parse(s)).collect(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> SearchEngine {
        self.engine
    }
}

// Hardcoded selectors should never fail to parse; a failure is a bug in the
// tables above and is caught by `all_selectors_parse`.
fn parse(selector: &str) -> Selector {
    Selector::parse(selector)
        .unwrap_or_else(|e| panic!("BUG: hardcoded CSS selector '{selector}' is invalid: {e:?}"))
}

static GOOGLE_STRATEGY: LazyLock<Strategy> =
    LazyLock::new(|| Strategy::compile(SearchEngine::Google, &GOOGLE));

static BING_STRATEGY: LazyLock<Strategy> =
    LazyLock::new(|| Strategy::compile(SearchEngine::Bing, &BING));

static DUCKDUCKGO_STRATEGY: LazyLock<Strategy> =
    LazyLock::new(|| Strategy::compile(SearchEngine::DuckDuckGo, &DUCKDUCKGO));

/// Extraction strategy for `engine`; `None` for `Unknown`.
#[must_use]
pub fn strategy_for(engine: SearchEngine) -> Option<&'static Strategy> {
    match engine {
        SearchEngine::Google => Some(&GOOGLE_STRATEGY),
        SearchEngine::Bing => Some(&BING_STRATEGY),
        SearchEngine::DuckDuckGo => Some(&DUCKDUCKGO_STRATEGY),
        SearchEngine::Unknown => None,
    }
}
