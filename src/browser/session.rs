//! Attaching to a running Chrome

use anyhow::{Context, Result, anyhow};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::js_protocol::runtime::{AddBindingParams, EventBindingCalled};
use chromiumoxide::listeners::EventStream;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace};
use url::Url;

use crate::page_context::{PageSnapshot, SearchEngine};
use crate::utils::EVENT_BINDING;

/// A DevTools connection and its event handler task.
///
/// The handler is aborted on drop. The browser itself is left running.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Connect to the DevTools endpoint at `ws_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be reached.
    pub async fn attach(ws_url: &str) -> Result<Self> {
        let (browser, mut handler) = Browser::connect(ws_url)
            .await
            .with_context(|| format!("Failed to connect to browser at {ws_url}"))?;

        let handler = task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    let message = e.to_string();
                    // Chrome emits CDP messages chromiumoxide cannot decode; these are harmless.
                    if message.contains("data did not match any variant of untagged enum Message")
                        || message.contains("Failed to deserialize WS response")
                    {
                        trace!("Suppressed benign CDP serialization error: {}", message);
                    } else {
                        error!("Browser handler error: {:?}", e);
                    }
                }
            }
            info!("Browser handler task completed");
        });

        info!("Attached to browser at {}", ws_url);
        Ok(Self { browser, handler })
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// The first tab showing a supported results page, else the first tab.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser has no open tabs.
    pub async fn select_page(&self) -> Result<Page> {
        let pages = self
            .browser
            .pages()
            .await
            .context("Failed to list browser tabs")?;

        for page in &pages {
            let Ok(Some(location)) = page.url().await else {
                continue;
            };
            let engine = Url::parse(&location)
                .map(|url| SearchEngine::detect(&url))
                .unwrap_or(SearchEngine::Unknown);
            if engine.is_supported() {
                debug!("Selected {} tab {}", engine, location);
                return Ok(page.clone());
            }
        }

        pages
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Browser has no open tabs"))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        debug!("Dropping BrowserSession - aborting handler task");
        self.handler.abort();
    }
}

/// Capture the tab's location and serialized document.
///
/// # Errors
///
/// Returns an error if the tab cannot be read or has no absolute URL.
pub async fn snapshot(page: &Page) -> Result<PageSnapshot> {
    let location = page
        .url()
        .await
        .context("Failed to read page URL")?
        .unwrap_or_else(|| "about:blank".to_string());
    let html = page.content().await.context("Failed to read page content")?;

    PageSnapshot::parse(&location, html).with_context(|| format!("Invalid page URL '{location}'"))
}

/// Install the event binding and subscribe to its calls.
///
/// # Errors
///
/// Returns an error if the binding cannot be added or the listener fails.
pub async fn bind_events(page: &Page) -> Result<EventStream<EventBindingCalled>> {
    let events = page
        .event_listener::<EventBindingCalled>()
        .await
        .context("Failed to subscribe to binding calls")?;

    page.execute(AddBindingParams::new(EVENT_BINDING))
        .await
        .context("Failed to install overlay event binding")?;

    Ok(events)
}
