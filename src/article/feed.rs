//! rss feed of published articles.

use crate::{
    config::SiteConfig,
    render::ARTICLE_PREFIX,
    store::Post,
    utils::{date::to_rfc2822, html::slug_href},
};
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

/// Render the feed channel for `posts` (already filtered and ordered).
pub fn build_feed(config: &SiteConfig, posts: &[Post]) -> Result<String> {
    let base_url = config
        .base
        .origin()
        .ok_or_else(|| anyhow!("[base].url is required for the rss feed"))?;

    let author = normalize_rss_author(config);
    let items: Vec<_> = posts
        .iter()
        .map(|post| post_to_rss_item(post, base_url, &author))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&config.base.title)
        .link(base_url)
        .description(&config.base.description)
        .language(config.base.language.clone())
        .generator(concat!("jotter ", env!("CARGO_PKG_VERSION")).to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn post_to_rss_item(post: &Post, base_url: &str, author: &str) -> rss::Item {
    let link = format!("{base_url}{}", slug_href(ARTICLE_PREFIX, &post.slug));
    let categories = (!post.tag.is_empty())
        .then(|| CategoryBuilder::default().name(post.tag.clone()).build())
        .into_iter()
        .collect::<Vec<_>>();

    ItemBuilder::default()
        .title(post.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description((!post.description.is_empty()).then(|| post.description.clone()))
        .pub_date(to_rfc2822(&post.created_at))
        .author(author.to_string())
        .categories(categories)
        .build()
}

/// Author field in rss form: "email@example.com (Name)".
///
/// The configured author is used as-is when already in that form,
/// otherwise it is combined with the configured email.
fn normalize_rss_author(config: &SiteConfig) -> String {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    let author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(author) {
        return author.clone();
    }
    format!("{} ({})", config.base.email, author)
}
