//! Page scripts evaluated through `Runtime.evaluate`
//!
//! Each script is an IIFE returning a boolean. Arguments are spliced in as
//! JSON literals so markup and ids are never interpreted as code.

use serde::Deserialize;
use serde_json::Value;

use crate::overlay::{InstanceId, OverlayEvent, OverlayEventKind};
use crate::utils::EVENT_BINDING;

/// Window property holding the single installed keydown listener.
const KEYDOWN_SLOT: &str = "__searchLensKeydown";

const REMOVE_ELEMENT: &str = r#"
    (() => {
        const el = document.getElementById(__ID__);
        if (!el) return false;
        el.remove();
        return true;
    })()
"#;

const APPEND_OVERLAY: &str = r#"
    (() => {
        if (!document.body) return false;
        const tpl = document.createElement('template');
        tpl.innerHTML = __MARKUP__;
        const root = tpl.content.firstElementChild;
        if (!root) return false;

        const send = (kind) => {
            const binding = window[__BINDING__];
            if (typeof binding === 'function') {
                binding(JSON.stringify({ instance: __INSTANCE__, kind }));
            }
        };

        root.addEventListener('click', (e) => {
            if (e.target === root) send('backdrop_click');
        });
        const modal = root.querySelector('[data-lens-modal]');
        if (modal) {
            modal.addEventListener('click', (e) => {
                e.stopPropagation();
                send('modal_click');
            });
        }
        const close = root.querySelector('[data-lens-close]');
        if (close) {
            close.addEventListener('click', (e) => {
                e.stopPropagation();
                send('close_button');
            });
        }

        document.body.appendChild(root);
        return true;
    })()
"#;

const ADD_KEYDOWN: &str = r#"
    (() => {
        const slot = window[__SLOT__];
        if (slot) document.removeEventListener('keydown', slot.handler);

        const handler = (e) => {
            const binding = window[__BINDING__];
            if (typeof binding === 'function') {
                binding(JSON.stringify({ instance: __INSTANCE__, kind: 'key_down', key: e.key }));
            }
        };
        document.addEventListener('keydown', handler);
        window[__SLOT__] = { instance: __INSTANCE__, handler };
        return true;
    })()
"#;

const REMOVE_KEYDOWN: &str = r#"
    (() => {
        const slot = window[__SLOT__];
        if (!slot || slot.instance !== __INSTANCE__) return false;
        document.removeEventListener('keydown', slot.handler);
        delete window[__SLOT__];
        return true;
    })()
"#;

fn literal(s: &str) -> String {
    Value::from(s).to_string()
}

pub fn remove_element(id: &str) -> String {
    REMOVE_ELEMENT.replace("__ID__", &literal(id))
}

pub fn append_overlay(markup: &str, instance: InstanceId) -> String {
    APPEND_OVERLAY
        .replace("__BINDING__", &literal(EVENT_BINDING))
        .replace("__INSTANCE__", &instance.0.to_string())
        .replace("__MARKUP__", &literal(markup))
}

pub fn add_keydown(instance: InstanceId) -> String {
    ADD_KEYDOWN
        .replace("__SLOT__", &literal(KEYDOWN_SLOT))
        .replace("__BINDING__", &literal(EVENT_BINDING))
        .replace("__INSTANCE__", &instance.0.to_string())
}

pub fn remove_keydown(instance: InstanceId) -> String {
    REMOVE_KEYDOWN
        .replace("__SLOT__", &literal(KEYDOWN_SLOT))
        .replace("__INSTANCE__", &instance.0.to_string())
}

#[derive(Debug, Deserialize)]
struct BindingPayload {
    instance: InstanceId,
    #[serde(flatten)]
    kind: OverlayEventKind,
}

/// Decode the JSON payload a page script passed to the event binding.
///
/// # Errors
///
/// Returns an error if the payload is not a known event.
pub fn decode_event(payload: &str) -> Result<OverlayEvent, serde_json::Error> {
    let payload: BindingPayload = serde_json::from_str(payload)?;
    Ok(OverlayEvent::new(payload.instance, payload.kind))
}
