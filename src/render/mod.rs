//! HTML fragment renderers.
//!
//! Every renderer is a pure function from typed status data to a markup
//! string for exactly one container. Callers replace the container's whole
//! content with the result; nothing here diffs against previous output.
//!
//! Markup keeps Bootstrap 5 and Font Awesome class names so the page shell
//! can style it, but no styling logic lives here beyond the class choice.

pub mod details;
pub mod inference;
pub mod overview;
pub mod repl;
pub mod servers;
pub mod topology;

pub use details::{render_details, render_details_error, render_details_loading};
pub use inference::render_inference_grid;
pub use overview::{render_overview, Overview};
pub use repl::render_repl_errors;
pub use servers::{progress_level, render_server_rows, ProgressLevel};
pub use topology::{delay_health, render_master, render_slaves, DelayHealth};

/// Escape text for use in element content and double- or single-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Cut `s` to at most `max` characters, appending `...` when anything was removed.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
