//! Overlay host backed by a live Chrome tab

use chromiumoxide::page::Page;
use tracing::trace;

use super::scripts;
use crate::overlay::{HostError, InstanceId, OverlayElement, OverlayHost};

/// Writes the overlay into a tab over the DevTools protocol.
#[derive(Debug, Clone)]
pub struct BrowserOverlay {
    page: Page,
}

impl BrowserOverlay {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn evaluate_bool(&self, script: &str) -> Result<bool, HostError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| HostError::Browser(e.to_string()))?;

        result
            .into_value::<bool>()
            .map_err(|e| HostError::Script(e.to_string()))
    }
}

impl OverlayHost for BrowserOverlay {
    async fn remove_element(&mut self, id: &str) -> Result<bool, HostError> {
        self.evaluate_bool(&scripts::remove_element(id)).await
    }

    async fn append_to_body(&mut self, element: &OverlayElement) -> Result<(), HostError> {
        let script = scripts::append_overlay(element.markup(), element.instance());
        if self.evaluate_bool(&script).await? {
            Ok(())
        } else {
            Err(HostError::NoBody)
        }
    }

    async fn add_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError> {
        self.evaluate_bool(&scripts::add_keydown(instance)).await?;
        Ok(())
    }

    async fn remove_keydown_listener(&mut self, instance: InstanceId) -> Result<(), HostError> {
        if !self.evaluate_bool(&scripts::remove_keydown(instance)).await? {
            trace!("Keydown listener {} was not installed", instance);
        }
        Ok(())
    }
}
