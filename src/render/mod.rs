// src/render/mod.rs
//! Markup rendering of the résumé preview

pub mod preview;

pub use preview::{render_container, render_page, render_print_page, PREVIEW_ELEMENT_ID};

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Drop a leading `http://` or `https://`
pub fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">R&D's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("张伟"), "张伟");
    }

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("https://github.com/a"), "github.com/a");
        assert_eq!(strip_scheme("http://x.cn"), "x.cn");
        assert_eq!(strip_scheme("github.com/a"), "github.com/a");
    }
}
