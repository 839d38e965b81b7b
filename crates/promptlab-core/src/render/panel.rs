use super::escape_html;
use crate::dispatch::InterfaceResponse;

/// Capabilities granted to the live preview frame. No top-level navigation.
pub const PREVIEW_SANDBOX: &str = "allow-scripts allow-same-origin";

const NO_CODE: &str = "No code generated";
const NO_PREVIEW: &str = "<p>No preview available</p>";
const NO_DESCRIPTION: &str = "No description provided";

/// Where the interface generation form is in its submit cycle.
///
/// `Idle -> Submitting -> Success | Error`, and back to `Submitting` on the
/// next submit. There is no retry state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelState {
    #[default]
    Idle,
    Submitting,
    Success(InterfaceResponse),
    Error(String),
}

/// Markup for the single-slot results region of the interface page.
pub struct InterfacePanel;

impl InterfacePanel {
    pub fn render(state: &PanelState) -> Option<String> {
        match state {
            PanelState::Success(data) => Some(Self::success_html(data)),
            PanelState::Error(message) => Some(Self::error_html(message)),
            PanelState::Idle | PanelState::Submitting => None,
        }
    }

    pub fn generation_time(data: &InterfaceResponse) -> String {
        match data.time_elapsed {
            Some(t) if t != 0.0 => format!("{:.2}s", t),
            _ => "N/A".to_string(),
        }
    }

    pub fn line_count(data: &InterfaceResponse) -> usize {
        data.response.split('\n').count()
    }

    pub fn error_html(message: &str) -> String {
        format!(
            r#"<div class="error-message">
    <h3>❌ Generation Failed</h3>
    <p>{message}</p>
    <button data-action="close" class="btn btn-secondary">Close</button>
</div>
"#,
            message = escape_html(message),
        )
    }

    pub fn success_html(data: &InterfaceResponse) -> String {
        let model = escape_html(&data.model);
        let code = if data.response.is_empty() { NO_CODE } else { data.response.as_str() };
        let preview = if data.response.is_empty() { NO_PREVIEW } else { data.response.as_str() };
        let description = if data.description.is_empty() {
            NO_DESCRIPTION
        } else {
            data.description.as_str()
        };

        format!(
            r#"<div class="result-header">
    <div class="success-message">
        <h3>✅ Interface Generated Successfully!</h3>
        <p>Your educational interface has been created using <strong>{model}</strong>.</p>
    </div>
    <div class="metrics">
        <div class="metric-card">
            <div class="metric-value">{model}</div>
            <div class="metric-label">Model Used</div>
        </div>
        <div class="metric-card">
            <div class="metric-value">{time}</div>
            <div class="metric-label">Generation Time</div>
        </div>
        <div class="metric-card">
            <div class="metric-value">{lines}</div>
            <div class="metric-label">Lines of Code</div>
        </div>
    </div>
</div>
<div class="actions">
    <button class="btn btn-success" data-action="download">📥 Download HTML</button>
    <button class="btn btn-primary" data-action="copy">📋 Copy Code</button>
    <button class="btn btn-secondary" data-action="open">🔗 Open in New Tab</button>
    <button class="btn btn-primary" data-action="generate-another">🔄 Generate Another</button>
</div>
<div class="result-container">
    <div class="code-section">
        <h3>Generated Code</h3>
        <div class="code-display">{code}</div>
    </div>
    <div class="preview-section">
        <h3>Live Preview</h3>
        <iframe class="preview-frame" srcdoc="{preview}" sandbox="{sandbox}">
            Your browser does not support iframes.
        </iframe>
        <div class="preview-note">
            <small>⚠️ Preview runs in sandboxed mode for security</small>
        </div>
    </div>
</div>
<div class="original-description">
    <h3>Original Description</h3>
    <div class="description-text">{description}</div>
</div>
"#,
            model = model,
            time = escape_html(&Self::generation_time(data)),
            lines = Self::line_count(data),
            code = escape_html(code),
            preview = escape_html(preview),
            sandbox = PREVIEW_SANDBOX,
            description = escape_html(description),
        )
    }
}
