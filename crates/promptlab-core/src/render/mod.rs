//! Result rendering: the append-only history table and the generated
//! interface panel.

mod panel;
mod table;

pub use panel::{InterfacePanel, PanelState, PREVIEW_SANDBOX};
pub use table::{format_prompt_cell, HistoryRow, HistoryTable};

/// Escape text for use in HTML content or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_safe(text).into_owned()
}

/// Inverse of [`escape_html`].
pub fn decode_html(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
