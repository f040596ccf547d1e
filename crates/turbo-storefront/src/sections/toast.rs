//! Toast fragment.

use super::escape_html;
use crate::notify::{Toast, ToastPhase};

/// Render one toast with its close button.
pub fn render_toast(toast: &Toast) -> String {
    let opacity = match toast.phase {
        ToastPhase::Visible => "1",
        ToastPhase::Fading => "0",
    };

    format!(
        r#"<div class="alert alert-{kind}" data-toast-id="{id}" style="position: fixed; top: 100px; right: 20px; z-index: 9999; animation: slideIn 0.3s ease; min-width: 250px; opacity: {opacity};">
    {message}
    <button class="alert-close" data-dismiss="{id}">&times;</button>
</div>"#,
        kind = toast.kind.as_str(),
        id = toast.id,
        opacity = opacity,
        message = escape_html(&toast.message),
    )
}
