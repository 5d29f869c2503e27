//! HTML text helpers shared by the page renderers.

use pulldown_cmark::{Event, Options, Parser, html::push_html};

/// Escape special HTML characters for text and attribute positions.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render an article body from markdown.
///
/// Raw HTML in the source is shown as text, never passed through.
pub fn markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS;

    let events = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        event => event,
    });

    let mut out = String::with_capacity(content.len() * 3 / 2);
    push_html(&mut out, events);
    out
}

/// Percent-encode a slug for use inside an href.
pub fn slug_href(prefix: &str, slug: &str) -> String {
    format!("{prefix}{}", urlencoding::encode(slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("hello"), "hello");
        assert_eq!(escape("<b>"), "&lt;b&gt;");
        assert_eq!(escape("a & b"), "a &amp; b");
        assert_eq!(escape(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_ampersand_first() {
        // Must not double-escape the entities it produces
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_markdown_paragraphs() {
        assert_eq!(markdown("first\n\nsecond"), "<p>first</p>\n<p>second</p>\n");
        assert_eq!(markdown(""), "");
    }

    #[test]
    fn test_markdown_headings_and_emphasis() {
        let html = markdown("## Setup\n\nSome *light* and **bold** text.");
        assert!(html.contains("<h2>Setup</h2>"));
        assert!(html.contains("<em>light</em>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_markdown_links_and_images() {
        let html = markdown("See [the docs](https://docs.rs) and ![cat](/cat.png)");
        assert!(html.contains(r#"<a href="https://docs.rs">the docs</a>"#));
        assert!(html.contains(r#"<img src="/cat.png" alt="cat" />"#));
    }

    #[test]
    fn test_markdown_code() {
        let html = markdown("Call `run()`:\n\n```rust\nfn main() { let x = 1 < 2; }\n```");
        assert!(html.contains("<code>run()</code>"));
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("let x = 1 &lt; 2;"));
    }

    #[test]
    fn test_markdown_escapes_raw_html() {
        let html = markdown("<script>alert(1)</script>\n\nInline <b>bold</b> tag.");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_slug_href_encodes() {
        assert_eq!(slug_href("/article/", "hello-world"), "/article/hello-world");
        assert_eq!(slug_href("/article/", "a b/c"), "/article/a%20b%2Fc");
    }
}
