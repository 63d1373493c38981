//! Form feedback pages

use super::escape_html;

/// Renders the page shown when a submitted form fails validation.
pub fn form_errors_page(title: &str, back_href: &str, messages: &[String]) -> String {
    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>", escape_html(message)))
        .collect();
    let title = escape_html(title);
    let back_href = escape_html(back_href);

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body>
    <h1>{title}</h1>
    <ul class="errors">{items}</ul>
    <p><a href="{back_href}">Go back</a></p>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_page_lists_messages() {
        let page = form_errors_page(
            "Sign up failed",
            "/signup",
            &["email: is required".to_string(), "password: too short".to_string()],
        );

        assert!(page.contains("<title>Sign up failed</title>"));
        assert!(page.contains("<li>email: is required</li><li>password: too short</li>"));
        assert!(page.contains(r#"<a href="/signup">Go back</a>"#));
    }
}
