//! Server-side HTML rendering.
//!
//! Pages are embedded templates with `{placeholder}` slots. Every value
//! that comes from the database or config is escaped before it is placed.

mod pages;

pub use pages::{render_article, render_list, render_not_found};

use crate::{config::SiteConfig, greeting::TYPE_DELAY, utils::html::escape, utils::minify::minify_page};

/// Page shell: head meta, header, greeting slot and footer
const LAYOUT_TEMPLATE: &str = include_str!("../embed/layout.html");

/// Greeting slot and its typewriter script
const GREETING_TEMPLATE: &str = include_str!("../embed/greeting.html");

/// Path the greeting script fetches from.
pub const GREETING_ENDPOINT: &str = "/api/greeting";

/// Article pages live under this prefix, followed by the encoded slug.
pub const ARTICLE_PREFIX: &str = "/article/";

/// Head metadata of one page. All fields are raw text.
#[derive(Debug, Clone)]
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Open Graph image; falls back to the configured avatar
    pub image: Option<&'a str>,
    pub is_article: bool,
}

/// Wrap `main` (already rendered html) in the site layout and minify.
pub fn layout(config: &SiteConfig, meta: &PageMeta<'_>, main: &str) -> Vec<u8> {
    let base = &config.base;

    let greeting = if config.greeting.enable {
        let delay_ms = TYPE_DELAY.as_millis().to_string();
        fill(
            GREETING_TEMPLATE,
            &[("endpoint", GREETING_ENDPOINT), ("delay_ms", delay_ms.as_str())],
        )
    } else {
        String::new()
    };

    let feed_link = if config.feed.enable {
        format!(
            r#"<link rel="alternate" type="application/rss+xml" title="{}" href="/{}">"#,
            escape(&base.title),
            escape(&config.feed.path)
        )
    } else {
        String::new()
    };

    let footer = escape(base.footer());

    let lang = escape(&base.language);
    let title = escape(meta.title);
    let description = escape(meta.description);
    let og_image = escape(base.og_image(meta.image));
    let site_title = escape(&base.title);
    let og_type = if meta.is_article { "article" } else { "website" };

    let html = fill(
        LAYOUT_TEMPLATE,
        &[
            ("lang", lang.as_str()),
            ("title", title.as_str()),
            ("description", description.as_str()),
            ("og_image", og_image.as_str()),
            ("og_type", og_type),
            ("feed_link", feed_link.as_str()),
            ("site_title", site_title.as_str()),
            ("greeting", greeting.as_str()),
            ("main", main),
            ("footer", footer.as_str()),
        ],
    );

    minify_page(html.as_bytes(), config).into_owned()
}

/// Substitute `{key}` slots in one pass; substituted text is never
/// re-scanned, and braces that are not a known slot are left alone.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let slot = after
            .find('}')
            .map(|end| &after[..end])
            .and_then(|key| values.iter().find(|(k, _)| *k == key));

        match slot {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
