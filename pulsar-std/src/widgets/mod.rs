//! UI widgets that produce markup.
//!
//! - [`card`]: structured cards rendered to HTML
//! - [`autocomplete`]: suggestion matching and keyboard navigation

pub mod autocomplete;
pub mod card;

pub use autocomplete::{Autocomplete, Dropdown, Key, Suggestion};
pub use card::{Card, CardDrawer, CardSegment, KeyValue};

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
