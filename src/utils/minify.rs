//! HTML minification for rendered pages.
//!
//! Enabled or disabled by `[render] minify` in `jotter.toml`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a rendered page if enabled in config.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify_page<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if config.render.minify {
        Cow::Owned(minify_html_inner(html))
    } else {
        Cow::Borrowed(html)
    }
}

/// Minify HTML content using `minify_html` crate.
///
/// The greeting script is inline, so js minification stays on.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_minify(enabled: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.render.minify = enabled;
        config
    }

    #[test]
    fn test_minify_page_basic() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello</p>\n  </body>\n</html>";
        let result = minify_page(html, &config_with_minify(true));
        let result_str = String::from_utf8_lossy(&result);

        assert!(!result_str.contains("\n  "));
        assert!(result_str.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_minify_page_preserves_text() {
        let html = b"<p>12 views</p><p>3 minute read</p>";
        let result = minify_page(html, &config_with_minify(true));
        let result_str = String::from_utf8_lossy(&result);

        assert!(result_str.contains("12 views"));
        assert!(result_str.contains("3 minute read"));
    }

    #[test]
    fn test_minify_page_disabled() {
        let html = b"<html>\n  <body>\n  </body>\n</html>";
        let minified = minify_page(html, &config_with_minify(true));
        let untouched = minify_page(html, &config_with_minify(false));

        assert!(minified.len() < untouched.len());
        assert_eq!(&*untouched, html);
    }
}
