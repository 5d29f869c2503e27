use super::{ARTICLE_PREFIX, PageMeta, layout};
use crate::{
    article::ArticleView,
    config::SiteConfig,
    store::{Post, PostLink},
    utils::{
        date::{format_long, format_short},
        html::{escape, markdown, slug_href},
    },
};

/// Copies the address of the current page to the clipboard.
const COPY_LINK: &str = r#"<button type="button" class="copy-link" onclick="navigator.clipboard.writeText(location.href).then(() => { this.textContent = 'Copied!'; }).catch(() => {})">Copy link</button>"#;

/// Article index as a grid of cards.
pub fn render_list(config: &SiteConfig, posts: &[Post]) -> Vec<u8> {
    let cards = if posts.is_empty() {
        r#"<p class="empty">No articles yet.</p>"#.to_string()
    } else {
        let cards: Vec<_> = posts.iter().map(card).collect();
        format!(r#"<section class="grid">{}</section>"#, cards.join("\n"))
    };

    let main = format!(
        "<h1>{}</h1>\n<p class=\"meta\">{}</p>\n{cards}",
        escape(&config.base.title),
        escape(&config.base.description),
    );

    layout(
        config,
        &PageMeta {
            title: &config.base.title,
            description: &config.base.description,
            image: None,
            is_article: false,
        },
        &main,
    )
}

fn card(post: &Post) -> String {
    let tag = if post.tag.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="badge">{}</span>"#, escape(&post.tag))
    };

    format!(
        r#"<article class="card">
<a href="{href}"><h2>{title}</h2></a>
<p class="meta"><time datetime="{datetime}">{date}</time></p>
<p>{description}</p>
<p>{tag}<span class="badge">{views}</span></p>
</article>"#,
        href = slug_href(ARTICLE_PREFIX, &post.slug),
        title = escape(&post.title),
        datetime = post.created_at.to_rfc3339(),
        date = format_short(&post.created_at),
        description = escape(&post.description),
        views = plural(post.views, "view"),
    )
}

/// Article detail page.
pub fn render_article(config: &SiteConfig, view: &ArticleView) -> Vec<u8> {
    let post = &view.post;

    let tag = if post.tag.is_empty() {
        String::new()
    } else {
        format!(r#" · <span class="badge">{}</span>"#, escape(&post.tag))
    };
    let updated = post
        .updated_at
        .map(|at| format!(r#"<p class="updated">Last updated {}</p>"#, format_long(&at)))
        .unwrap_or_default();

    let main = format!(
        r#"<article class="post">
<h1>{title}</h1>
<p class="meta"><time datetime="{datetime}">{date}</time> · {views} · {minutes} minute read{tag} {copy_link}</p>
{body}
{updated}
</article>
{neighbours}"#,
        title = escape(&post.title),
        datetime = post.created_at.to_rfc3339(),
        date = format_long(&post.created_at),
        views = plural(view.views, "view"),
        minutes = view.reading_minutes,
        copy_link = COPY_LINK,
        body = markdown(&post.content),
        neighbours = neighbours(view.previous.as_ref(), view.next.as_ref()),
    );

    layout(
        config,
        &PageMeta {
            title: &post.title,
            description: &post.description,
            image: post.image.as_deref(),
            is_article: true,
        },
        &main,
    )
}

fn neighbours(previous: Option<&PostLink>, next: Option<&PostLink>) -> String {
    if previous.is_none() && next.is_none() {
        return String::new();
    }

    let link = |class: &str, label: &str, target: &PostLink| {
        format!(
            r#"<a class="{class}" href="{}">{label}: {}</a>"#,
            slug_href(ARTICLE_PREFIX, &target.slug),
            escape(&target.title)
        )
    };

    let previous = previous.map(|p| link("previous", "Previous", p)).unwrap_or_default();
    let next = next.map(|n| link("next", "Next", n)).unwrap_or_default();
    format!(r#"<nav class="neighbours">{previous}{next}</nav>"#)
}

/// Body of the `/404` page.
pub fn render_not_found(config: &SiteConfig) -> Vec<u8> {
    let main = r#"<h1>404</h1>
<p>This page could not be found.</p>
<p><a href="/">Back to all articles</a></p>"#;

    layout(
        config,
        &PageMeta {
            title: "404: This page could not be found",
            description: &config.base.description,
            image: None,
            is_article: false,
        },
        main,
    )
}

fn plural(n: i64, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
