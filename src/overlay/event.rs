//! User interactions delivered to the overlay presenter

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one overlay lifetime.
///
/// Allocated fresh for every overlay the presenter inserts. It also names the
/// keydown listener installed for that overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An interaction with a specific overlay instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEvent {
    pub instance: InstanceId,
    pub kind: OverlayEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayEventKind {
    /// A key pressed anywhere on the page while the listener is installed.
    KeyDown { key: String },
    /// Click on the dimmed full-viewport backdrop, outside the modal body.
    BackdropClick,
    /// Click inside the modal body.
    ModalClick,
    /// Click on the header close control.
    CloseButton,
}

impl OverlayEvent {
    #[must_use]
    pub fn new(instance: InstanceId, kind: OverlayEventKind) -> Self {
        Self { instance, kind }
    }

    #[must_use]
    pub fn key(instance: InstanceId, key: impl Into<String>) -> Self {
        Self::new(instance, OverlayEventKind::KeyDown { key: key.into() })
    }

    #[must_use]
    pub fn escape(instance: InstanceId) -> Self {
        Self::key(instance, "Escape")
    }
}

/// Why an overlay was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Escape,
    Backdrop,
    CloseButton,
}

/// What the presenter did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Closed, stale, or not a dismissal gesture.
    Ignored,
    Dismissed(DismissReason),
}
