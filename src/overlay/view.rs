//! Overlay views and their markup
//!
//! Every payload string is HTML-escaped before it is placed in the markup,
//! so service output is always displayed as text and never parsed as markup.

use html_escape::encode_text;

use super::event::InstanceId;
use crate::summary::{FailurePayload, SuccessPayload};
use crate::utils::OVERLAY_ID;

/// The three renderable overlay views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayState {
    Loading,
    Error(FailurePayload),
    Success(SuccessPayload),
}

impl OverlayState {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(FailurePayload {
            error: message.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Success(_) => "success",
        }
    }

    /// Loading is the only non-terminal view.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

pub const TITLE: &str = "AI Search Summary";
pub const LOADING_MESSAGE: &str = "Analyzing search results with AI...";
pub const LOADING_HINT: &str = "This may take a few seconds";
pub const ERROR_HINT: &str = "Make sure Ollama is running:";
pub const ERROR_HINT_COMMAND: &str = "ollama serve";

const OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; right: 0; bottom: 0; \
background: rgba(0, 0, 0, 0.7); z-index: 999999; display: flex; align-items: center; \
justify-content: center; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; \
backdrop-filter: blur(4px);";

const MODAL_STYLE: &str = "background: white; border-radius: 16px; width: 700px; max-width: 90%; \
max-height: 80vh; overflow: hidden; box-shadow: 0 20px 60px rgba(0, 0, 0, 0.3); display: flex; \
flex-direction: column;";

const HEADER_STYLE: &str = "padding: 24px; border-bottom: 1px solid #e0e0e0; display: flex; \
justify-content: space-between; align-items: center; \
background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white;";

const CLOSE_STYLE: &str = "background: none; border: none; color: white; font-size: 32px; \
cursor: pointer; padding: 0; width: 32px; height: 32px; line-height: 32px; opacity: 0.8;";

const CONTENT_STYLE: &str = "padding: 24px; overflow-y: auto; flex: 1;";

/// A rendered overlay, ready to be appended under the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayElement {
    instance: InstanceId,
    state: OverlayState,
    markup: String,
}

impl OverlayElement {
    /// Render `state` for the overlay lifetime `instance`.
    #[must_use]
    pub fn render(instance: InstanceId, state: OverlayState) -> Self {
        let content = match &state {
            OverlayState::Loading => render_loading(),
            OverlayState::Error(payload) => render_error(payload),
            OverlayState::Success(payload) => render_success(payload),
        };

        let markup = format!(
            concat!(
                r#"<div id="{id}" data-lens-instance="{instance}" data-lens-state="{state}" style="{overlay_style}">"#,
                r#"<div data-lens-modal style="{modal_style}">"#,
                r#"<div data-lens-header style="{header_style}">"#,
                r#"<h2 style="margin: 0; font-size: 24px; font-weight: 600;">{title}</h2>"#,
                r#"<button type="button" data-lens-close aria-label="Close" style="{close_style}">&times;</button>"#,
                "</div>",
                r#"<div data-lens-content style="{content_style}">{content}</div>"#,
                "</div></div>"
            ),
            id = OVERLAY_ID,
            instance = instance.0,
            state = state.name(),
            overlay_style = OVERLAY_STYLE,
            modal_style = MODAL_STYLE,
            header_style = HEADER_STYLE,
            title = TITLE,
            close_style = CLOSE_STYLE,
            content_style = CONTENT_STYLE,
            content = content,
        );

        Self {
            instance,
            state,
            markup,
        }
    }

    /// Always the reserved overlay id.
    #[must_use]
    pub fn id(&self) -> &'static str {
        OVERLAY_ID
    }

    #[must_use]
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    #[must_use]
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Outer HTML of the overlay root.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

fn render_loading() -> String {
    format!(
        concat!(
            r#"<div style="text-align: center; padding: 40px;">"#,
            r#"<div data-lens-spinner style="width: 50px; height: 50px; border: 4px solid #f3f3f3; "#,
            r#"border-top: 4px solid #667eea; border-radius: 50%; animation: lens-spin 1s linear infinite; "#,
            r#"margin: 0 auto 20px;"></div>"#,
            r#"<p style="color: #666; font-size: 16px;">{message}</p>"#,
            r#"<p style="color: #999; font-size: 14px;">{hint}</p>"#,
            "</div>",
            "<style>@keyframes lens-spin {{ 0% {{ transform: rotate(0deg); }} 100% {{ transform: rotate(360deg); }} }}</style>"
        ),
        message = LOADING_MESSAGE,
        hint = LOADING_HINT,
    )
}

fn render_error(payload: &FailurePayload) -> String {
    format!(
        concat!(
            r#"<div style="padding: 20px; background: #fee; border-left: 4px solid #f44; border-radius: 4px;">"#,
            r#"<h3 style="margin: 0 0 10px 0; color: #c33;">Error</h3>"#,
            r#"<p data-lens-error style="margin: 0; color: #666;">{error}</p>"#,
            r#"<p style="margin: 10px 0 0 0; font-size: 14px; color: #999;">{hint} "#,
            r#"<code style="background: #f5f5f5; padding: 2px 6px; border-radius: 3px;">{command}</code></p>"#,
            "</div>"
        ),
        error = encode_text(&payload.error),
        hint = ERROR_HINT,
        command = ERROR_HINT_COMMAND,
    )
}

fn render_success(payload: &SuccessPayload) -> String {
    format!(
        concat!(
            r#"<div style="padding: 12px; background: #f8f9fa; border-radius: 8px; margin-bottom: 20px;">"#,
            r#"<div style="font-size: 14px; color: #666; margin-bottom: 4px;">Search Query:</div>"#,
            r#"<div data-lens-query style="font-size: 16px; font-weight: 500; color: #333;">&quot;{query}&quot;</div>"#,
            "</div>",
            r#"<div data-lens-summary style="line-height: 1.8; color: #333; font-size: 15px; white-space: pre-wrap;">{summary}</div>"#,
            r#"<div data-lens-footer style="margin-top: 20px; padding-top: 16px; border-top: 1px solid #e0e0e0; "#,
            r#"font-size: 13px; color: #999; display: flex; justify-content: space-between;">"#,
            "<span>{analyzed}</span><span>{model}</span>",
            "</div>"
        ),
        query = encode_text(&payload.query),
        summary = encode_text(&payload.summary),
        analyzed = analyzed_label(payload.num_results),
        model = encode_text(&model_label(&payload.model)),
    )
}

/// Footer text reporting how many results were summarized.
#[must_use]
pub fn analyzed_label(num_results: u64) -> String {
    format!("Analyzed {num_results} results")
}

/// Footer text naming the model.
#[must_use]
pub fn model_label(model: &str) -> String {
    format!("Model: {model}")
}
