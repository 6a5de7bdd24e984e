//! Overlay presenter
//!
//! A full-viewport modal layered above the host page that shows one of
//! three views (loading, error, success) and can be dismissed with Escape,
//! a click on the backdrop, or the close control.

mod event;
mod host;
mod memory;
mod presenter;
pub mod view;

pub use event::{DismissReason, EventOutcome, InstanceId, OverlayEvent, OverlayEventKind};
pub use host::{HostError, OverlayHost};
pub use memory::MemoryHost;
pub use presenter::{OverlayPresenter, SharedPresenter};
pub use view::{OverlayElement, OverlayState};
