//! Chrome integration
//!
//! Attaches to a running browser over the DevTools protocol, reads the
//! current results page, and drives the overlay inside it. Overlay
//! interactions come back through a runtime binding.

mod host;
pub mod scripts;
mod session;

pub use host::BrowserOverlay;
pub use session::{BrowserSession, bind_events, snapshot};

use std::sync::Arc;

use anyhow::Result;
use chromiumoxide::cdp::js_protocol::runtime::EventBindingCalled;
use futures::{Stream, StreamExt};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::config::LensConfig;
use crate::orchestrator::Orchestrator;
use crate::overlay::{EventOutcome, OverlayHost, OverlayPresenter, OverlayState, SharedPresenter};
use crate::utils::EVENT_BINDING;

/// Feed binding calls to the presenter until the stream ends.
///
/// `dismissed` is notified every time an event closes the overlay.
pub async fn pump_events<H, S>(mut events: S, presenter: SharedPresenter<H>, dismissed: Arc<Notify>)
where
    H: OverlayHost,
    S: Stream<Item = Arc<EventBindingCalled>> + Unpin,
{
    while let Some(call) = events.next().await {
        if call.name != EVENT_BINDING {
            continue;
        }

        let event = match scripts::decode_event(&call.payload) {
            Ok(event) => event,
            Err(e) => {
                debug!("Ignoring malformed overlay event '{}': {}", call.payload, e);
                continue;
            }
        };

        let outcome = presenter.lock().await.handle_event(event).await;
        match outcome {
            Ok(EventOutcome::Dismissed(_)) => dismissed.notify_one(),
            Ok(EventOutcome::Ignored) => {}
            Err(e) => warn!("Failed to apply overlay event: {}", e),
        }
    }
}

/// Run the pipeline against the results tab of the browser at `ws_url`.
///
/// Returns once the overlay has been dismissed, the tab goes away, or the
/// process receives Ctrl-C.
///
/// # Errors
///
/// Returns an error if the browser cannot be attached or the tab read.
pub async fn run_in_browser(config: &LensConfig, ws_url: &str) -> Result<()> {
    let session = BrowserSession::attach(ws_url).await?;
    let page = session.select_page().await?;
    let page_snapshot = snapshot(&page).await?;
    info!("Running on {}", page_snapshot.url());

    let events = bind_events(&page).await?;
    let presenter = OverlayPresenter::shared(BrowserOverlay::new(page));
    let orchestrator = Orchestrator::from_config(config, Arc::clone(&presenter));
    let dismissed = Arc::new(Notify::new());

    // Both futures share the presenter lock, so they are polled side by side
    // in this task rather than from select! branch bodies.
    let pump = pump_events(events, Arc::clone(&presenter), Arc::clone(&dismissed));
    tokio::pin!(pump);

    tokio::select! {
        outcome = orchestrator.run(&page_snapshot) => match outcome {
            Ok(summary) => info!("Summary shown ({} results, {})", summary.num_results, summary.model),
            Err(e) => info!("Error shown: {}", e),
        },
        () = &mut pump => {
            warn!("Tab closed before the summary arrived");
            return Ok(());
        }
        _ = tokio::signal::ctrl_c() => {
            close_overlay(&presenter).await;
            return Ok(());
        }
    }

    // Nothing to wait for when the overlay is gone or never got past loading.
    let showing_result = presenter.lock().await.state().is_some_and(OverlayState::is_terminal);
    if !showing_result {
        return Ok(());
    }

    info!("Waiting for the overlay to be dismissed (Ctrl-C to close)");
    tokio::select! {
        () = dismissed.notified() => {}
        () = &mut pump => debug!("Overlay event stream ended"),
        _ = tokio::signal::ctrl_c() => close_overlay(&presenter).await,
    }

    drop(session);
    Ok(())
}

async fn close_overlay<H: OverlayHost>(presenter: &SharedPresenter<H>) {
    if let Err(e) = presenter.lock().await.close().await {
        warn!("Failed to close overlay: {}", e);
    }
}
