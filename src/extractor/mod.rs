//! Search result extraction
//!
//! Given the detected engine, pulls a bounded, ordered list of
//! title/link/snippet records out of the page's document using the engine's
//! selector fallback chains.

mod scrape;
pub mod selectors;
mod types;

pub use scrape::{scrape_document, scrape_results};
pub use selectors::{SelectorSpec, Strategy, strategy_for};
pub use types::{ResultRecord, ResultSet};
