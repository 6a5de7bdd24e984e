//! Result extraction over a parsed document

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};
use url::Url;

use super::selectors::{Strategy, strategy_for};
use super::types::{ResultRecord, ResultSet};
use crate::page_context::{PageSnapshot, SearchEngine};
use crate::utils::{MAX_RESULTS, collapse_whitespace};

/// Scrape the result cards of `page` with the strategy for `engine`.
///
/// `Unknown` yields an empty set. At most `MAX_RESULTS` records are kept,
/// in document order. The page is never mutated.
#[must_use]
pub fn scrape_results(engine: SearchEngine, page: &PageSnapshot) -> ResultSet {
    scrape_document(engine, page.html(), page.url(), MAX_RESULTS)
}

/// Scrape `html` as if it were served from `base`.
///
/// `base` resolves relative links to the absolute URLs a browser would
/// report for them.
#[must_use]
pub fn scrape_document(engine: SearchEngine, html: &str, base: &Url, limit: usize) -> ResultSet {
    let Some(strategy) = strategy_for(engine) else {
        debug!("No extraction strategy for engine '{}'", engine);
        return ResultSet::default();
    };

    let limit = limit.min(MAX_RESULTS);
    let document = Html::parse_document(html);

    let mut kept: HashMap<NodeId, String> = HashMap::new();
    let mut records = Vec::with_capacity(limit);
    let mut candidates = 0usize;

    for card in document.select(&strategy.cards) {
        if records.len() >= limit {
            break;
        }
        candidates += 1;

        let Some(record) = extract_record(card, strategy, base) else {
            trace!("Discarding incomplete card #{}", candidates);
            continue;
        };

        // A card inside a kept card that resolves to the same link is the
        // same visible result. Distinct links nested in a wrapper still count.
        let duplicate = card
            .ancestors()
            .filter_map(|node| kept.get(&node.id()))
            .any(|url| url == record.url());
        if duplicate {
            trace!("Skipping card #{} nested in a kept result with the same link", candidates);
            continue;
        }

        kept.insert((*card).id(), record.url().to_string());
        records.push(record);
    }

    debug!(
        engine = %engine,
        candidates,
        kept = records.len(),
        "Extracted search results"
    );

    ResultSet::with_limit(records, limit)
}

/// Build a record from one card, or `None` if any field is missing or blank.
fn extract_record(card: ElementRef<'_>, strategy: &Strategy, base: &Url) -> Option<ResultRecord> {
    let title = first_match(card, &strategy.title).map(element_text)?;
    let url = first_match(card, &strategy.link).and_then(|link| resolve_href(link, base))?;
    let snippet = first_match(card, &strategy.snippet).map(element_text)?;

    ResultRecord::new(title, url, snippet)
}

/// First element matched by the chain, trying selectors in order.
fn first_match<'a>(card: ElementRef<'a>, chain: &[Selector]) -> Option<ElementRef<'a>> {
    chain.iter().find_map(|selector| card.select(selector).next())
}

/// Concatenated descendant text with whitespace collapsed.
fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Absolute URL of a link element's `href`.
fn resolve_href(link: ElementRef<'_>, base: &Url) -> Option<String> {
    let href = link.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.bing.com/search?q=rust").unwrap()
    }

    #[test]
    fn relative_links_are_resolved() {
        let html = r#"
            <ol><li class="b_algo">
                <h2><a href="/ck/a?u=abc">Rust Book</a></h2>
                <div class="b_caption"><p>The Rust Programming Language</p></div>
            </li></ol>"#;
        let set = scrape_document(SearchEngine::Bing, html, &base(), MAX_RESULTS);
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].url(), "https://www.bing.com/ck/a?u=abc");
    }

    #[test]
    fn first_selector_in_chain_wins() {
        let html = r#"
            <li class="b_algo">
                <h2><a href="https://doc.rust-lang.org/book/">Book</a></h2>
                <p>stray paragraph</p>
                <div class="b_caption"><p>caption paragraph</p></div>
            </li>"#;
        let set = scrape_document(SearchEngine::Bing, html, &base(), MAX_RESULTS);
        assert_eq!(set.as_slice()[0].snippet(), "caption paragraph");
    }

    #[test]
    fn blank_text_discards_card() {
        let html = r#"
            <li class="b_algo">
                <h2><a href="https://example.com/">   </a></h2>
                <div class="b_caption"><p>snippet</p></div>
            </li>"#;
        assert!(scrape_document(SearchEngine::Bing, html, &base(), MAX_RESULTS).is_empty());
    }

    #[test]
    fn unknown_engine_yields_empty() {
        let html = "<li class=\"b_algo\"><h2><a href=\"/x\">t</a></h2><p>s</p></li>";
        assert!(scrape_document(SearchEngine::Unknown, html, &base(), MAX_RESULTS).is_empty());
    }

    #[test]
    fn wrapper_card_does_not_swallow_nested_results() {
        let card = |n: u8| {
            format!(
                r#"<div class="g"><a href="https://example.com/{n}"><h3>T{n}</h3></a>
                    <div class="VwiC3b">Snippet {n}</div></div>"#
            )
        };
        let html = format!(r#"<div data-hveid="CAEQAA">{}{}{}</div>"#, card(1), card(2), card(3));
        let base = Url::parse("https://www.google.com/search?q=rust").unwrap();

        let set = scrape_document(SearchEngine::Google, &html, &base, MAX_RESULTS);
        let urls: Vec<&str> = set.iter().map(ResultRecord::url).collect();
        assert_eq!(
            urls,
            ["https://example.com/1", "https://example.com/2", "https://example.com/3"]
        );
    }

    #[test]
    fn limit_is_clamped() {
        let card = "<li class=\"b_algo\"><h2><a href=\"/x\">t</a></h2><p>s</p></li>";
        let html = card.repeat(4);
        assert_eq!(scrape_document(SearchEngine::Bing, &html, &base(), 2).len(), 2);
    }
}
