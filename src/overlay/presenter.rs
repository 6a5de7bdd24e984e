//! Overlay state machine
//!
//! Closed → {Loading, Error, Success} on `show`, back to Closed on any
//! dismissal. Every `show` first tears down whatever overlay exists, so the
//! page never holds more than one.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::event::{DismissReason, EventOutcome, InstanceId, OverlayEvent, OverlayEventKind};
use super::host::{HostError, OverlayHost};
use super::view::{OverlayElement, OverlayState};
use crate::utils::OVERLAY_ID;

/// Presenter shared between the pipeline and the event source.
pub type SharedPresenter<H> = Arc<Mutex<OverlayPresenter<H>>>;

#[derive(Debug)]
struct OpenOverlay {
    instance: InstanceId,
    state: OverlayState,
}

/// Owns the host page's overlay slot.
#[derive(Debug)]
pub struct OverlayPresenter<H> {
    host: H,
    current: Option<OpenOverlay>,
    last_instance: u64,
    last_dismissed: Option<InstanceId>,
}

impl<H: OverlayHost> OverlayPresenter<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            current: None,
            last_instance: 0,
            last_dismissed: None,
        }
    }

    /// Wrap a new presenter for sharing.
    pub fn shared(host: H) -> SharedPresenter<H> {
        Arc::new(Mutex::new(Self::new(host)))
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// View currently displayed, `None` when closed.
    pub fn state(&self) -> Option<&OverlayState> {
        self.current.as_ref().map(|open| &open.state)
    }

    pub fn current_instance(&self) -> Option<InstanceId> {
        self.current.as_ref().map(|open| open.instance)
    }

    /// Whether the user dismissed `instance` or any overlay shown after it.
    ///
    /// Only dismissal gestures count. [`close`](Self::close) and failed
    /// renders do not.
    pub fn dismissed_since(&self, instance: InstanceId) -> bool {
        self.last_dismissed.is_some_and(|dismissed| dismissed >= instance)
    }

    /// Replace whatever overlay exists with a fresh one showing `state`.
    ///
    /// Wires the keydown listener for the new instance. The backdrop and
    /// close-control paths are part of the rendered element.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the previous overlay could not be removed
    /// or the new one could not be inserted. The presenter is closed
    /// afterwards.
    pub async fn show(&mut self, state: OverlayState) -> Result<InstanceId, HostError> {
        self.teardown().await?;

        self.last_instance += 1;
        let instance = InstanceId(self.last_instance);
        let element = OverlayElement::render(instance, state.clone());

        self.host.append_to_body(&element).await?;

        if let Err(e) = self.host.add_keydown_listener(instance).await {
            // Without a listener the overlay could not be closed with Escape.
            if let Err(cleanup) = self.host.remove_element(OVERLAY_ID).await {
                warn!("Failed to remove overlay {} after listener error: {}", instance, cleanup);
            }
            return Err(e);
        }

        info!("Showing {} overlay {}", state.name(), instance);
        self.current = Some(OpenOverlay { instance, state });
        Ok(instance)
    }

    /// Dismiss the current overlay. Returns whether one was open.
    ///
    /// # Errors
    ///
    /// Returns the first [`HostError`] hit while tearing down; the presenter
    /// is closed regardless.
    pub async fn close(&mut self) -> Result<bool, HostError> {
        let was_open = self.is_open();
        self.teardown().await?;
        Ok(was_open)
    }

    /// React to a user interaction.
    ///
    /// Escape, a backdrop click, and the close control dismiss the overlay.
    /// Everything else, and any event for an instance that is no longer
    /// current, is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if dismissal could not be applied to the page.
    pub async fn handle_event(&mut self, event: OverlayEvent) -> Result<EventOutcome, HostError> {
        let Some(current) = self.current_instance() else {
            debug!("Ignoring {:?}: no overlay open", event.kind);
            return Ok(EventOutcome::Ignored);
        };

        if event.instance != current {
            debug!("Ignoring event for stale overlay {} (current {})", event.instance, current);
            return Ok(EventOutcome::Ignored);
        }

        let reason = match event.kind {
            OverlayEventKind::KeyDown { key } if key == "Escape" => DismissReason::Escape,
            OverlayEventKind::BackdropClick => DismissReason::Backdrop,
            OverlayEventKind::CloseButton => DismissReason::CloseButton,
            OverlayEventKind::KeyDown { .. } | OverlayEventKind::ModalClick => {
                return Ok(EventOutcome::Ignored);
            }
        };

        self.last_dismissed = Some(current);
        self.teardown().await?;
        info!("Overlay {} dismissed ({:?})", current, reason);
        Ok(EventOutcome::Dismissed(reason))
    }

    /// Remove the reserved element and release the current listener.
    ///
    /// Idempotent. Both steps always run; the first failure is returned
    /// after the state has been cleared.
    async fn teardown(&mut self) -> Result<(), HostError> {
        let previous = self.current.take();

        let removed = self.host.remove_element(OVERLAY_ID).await;
        let released = match &previous {
            Some(open) => self.host.remove_keydown_listener(open.instance).await,
            None => Ok(()),
        };

        match (&removed, &previous) {
            (Ok(true), None) => debug!("Removed overlay left by an earlier invocation"),
            (Ok(false), Some(open)) => debug!("Overlay {} was already gone from the page", open.instance),
            _ => {}
        }

        removed.map(|_| ()).and(released)
    }
}
