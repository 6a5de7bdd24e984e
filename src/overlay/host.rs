//! The page surface the overlay is written into

use super::event::InstanceId;
use super::view::OverlayElement;

/// Failures applying an overlay mutation to the host page.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Browser command failed: {0}")]
    Browser(String),

    #[error("Host page has no document body")]
    NoBody,

    #[error("Unexpected script result: {0}")]
    Script(String),
}

/// Write side of the host page.
///
/// The overlay is the only thing ever written: one element under the
/// document body and one page-level keydown listener per overlay lifetime.
#[allow(async_fn_in_trait)]
pub trait OverlayHost {
    /// Remove the element carrying `id`, if any. Returns whether one existed.
    async fn remove_element(&mut self, id: &str) -> Result<bool, HostError>;

    /// Append `element` as the last child of the document body.
    async fn append_to_body(&mut self, element: &OverlayElement) -> Result<(), HostError>;

    /// Install the page-level keydown listener for `instance`.
    async fn add_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError>;

    /// Remove the keydown listener for `instance`. Removing an absent
    /// listener is not an error.
    async fn remove_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError>;
}
