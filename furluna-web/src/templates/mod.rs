//! Server-rendered HTML fragments
//!
//! Plain `format!` templates; values coming from outside the process are
//! escaped with [`escape_html`] before insertion.

pub mod forms;
pub mod hospitals;

pub use forms::form_errors_page;
pub use hospitals::{SEARCH_ERROR_NOTICE, render_card, render_hospitals, render_search_error};

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Cats & Dogs"), "Cats &amp; Dogs");
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("O'Brien Vet"), "O&#39;Brien Vet");
        assert_eq!(escape_html("plain"), "plain");
    }
}
