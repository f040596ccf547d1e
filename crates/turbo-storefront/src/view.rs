//! View state published by the panel widgets.

/// Content of a results panel (`#searchResults`, `#trackingResults`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    /// Inner HTML.
    pub html: String,
    /// Whether the panel is displayed.
    pub visible: bool,
}

impl PanelView {
    /// A visible panel with the given content.
    pub fn shown(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            visible: true,
        }
    }
}
