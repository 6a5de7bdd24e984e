//! In-process overlay host
//!
//! Models the document body as an ordered list of overlay elements and keeps
//! the set of installed keydown listeners, so overlay lifecycles can be
//! driven and inspected without a browser.

use super::event::{InstanceId, OverlayEvent};
use super::host::{HostError, OverlayHost};
use super::view::OverlayElement;

#[derive(Debug, Default)]
pub struct MemoryHost {
    body: Vec<OverlayElement>,
    keydown_listeners: Vec<InstanceId>,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Children appended to the body, in insertion order.
    #[must_use]
    pub fn body(&self) -> &[OverlayElement] {
        &self.body
    }

    /// Number of body children carrying `id`.
    #[must_use]
    pub fn count_with_id(&self, id: &str) -> usize {
        self.body.iter().filter(|el| el.id() == id).count()
    }

    /// First body child carrying `id`.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&OverlayElement> {
        self.body.iter().find(|el| el.id() == id)
    }

    #[must_use]
    pub fn keydown_listeners(&self) -> &[InstanceId] {
        &self.keydown_listeners
    }

    /// Simulate a key press on the page.
    ///
    /// Returns the event each installed listener would deliver, in
    /// installation order. Empty when no listener is installed.
    #[must_use]
    pub fn press_key(&self, key: &str) -> Vec<OverlayEvent> {
        self.keydown_listeners
            .iter()
            .map(|instance| OverlayEvent::key(*instance, key))
            .collect()
    }
}

impl OverlayHost for MemoryHost {
    async fn remove_element(&mut self, id: &str) -> Result<bool, HostError> {
        match self.body.iter().position(|el| el.id() == id) {
            Some(index) => {
                self.body.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn append_to_body(&mut self, element: &OverlayElement) -> Result<(), HostError> {
        self.body.push(element.clone());
        Ok(())
    }

    async fn add_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError> {
        self.keydown_listeners.push(instance);
        Ok(())
    }

    async fn remove_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError> {
        self.keydown_listeners.retain(|id| *id != instance);
        Ok(())
    }
}
