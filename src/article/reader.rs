//! Article detail: one view, one increment.

use super::reading;
use crate::store::{Post, PostLink, PostQuery, PostStore, StoreError};
use thiserror::Error;

/// Everything the article page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleView {
    pub post: Post,
    /// Count after this view was recorded
    pub views: i64,
    pub reading_minutes: u32,
    /// Nearest older published post
    pub previous: Option<PostLink>,
    /// Nearest newer published post
    pub next: Option<PostLink>,
}

#[derive(Debug, Error)]
pub enum ReadError {
    /// No published post has this slug.
    #[error("article not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ReadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

/// Load a published article by slug and record the view.
///
/// Drafts and unknown slugs are [`ReadError::NotFound`] and leave every
/// counter untouched.
pub fn read_article(
    store: &dyn PostStore,
    slug: &str,
    words_per_minute: u32,
) -> Result<ArticleView, ReadError> {
    if slug.is_empty() {
        return Err(ReadError::NotFound);
    }

    let post = store
        .first(&PostQuery::published_slug(slug))?
        .ok_or(ReadError::NotFound)?;

    let views = store.increment_views(post.id)?;
    let reading_minutes = reading::estimate(&post.content, words_per_minute);

    let previous = store
        .first(&PostQuery::previous_published(post.created_at))?
        .map(|p| p.link());
    let next = store
        .first(&PostQuery::next_published(post.created_at))?
        .map(|p| p.link());

    Ok(ArticleView {
        post,
        views,
        reading_minutes,
        previous,
        next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::tests::seeded;
    use crate::store::Filter;

    fn views_of(store: &dyn PostStore, slug: &str) -> i64 {
        store
            .first(&PostQuery::new().filter(Filter::Slug(slug.into())))
            .unwrap()
            .unwrap()
            .views
    }

    #[test]
    fn test_read_article_counts_one_view() {
        let store = seeded();

        let view = read_article(&store, "beta", 250).unwrap();
        assert_eq!(view.post.slug, "beta");
        assert_eq!(view.views, 1);
        assert_eq!(views_of(&store, "beta"), 1);

        let again = read_article(&store, "beta", 250).unwrap();
        assert_eq!(again.views, 2);
        assert_eq!(views_of(&store, "beta"), 2);
    }

    #[test]
    fn test_read_article_reading_time() {
        let store = seeded();
        // beta has 500 words
        assert_eq!(read_article(&store, "beta", 250).unwrap().reading_minutes, 2);
        assert_eq!(read_article(&store, "alpha", 250).unwrap().reading_minutes, 1);
    }

    #[test]
    fn test_read_article_neighbours_skip_drafts() {
        let store = seeded();

        let middle = read_article(&store, "beta", 250).unwrap();
        assert_eq!(middle.previous.map(|l| l.slug).as_deref(), Some("alpha"));
        assert_eq!(middle.next.map(|l| l.slug).as_deref(), Some("gamma"));

        let oldest = read_article(&store, "alpha", 250).unwrap();
        assert!(oldest.previous.is_none());
        assert_eq!(oldest.next.map(|l| l.title).as_deref(), Some("Beta"));

        let newest = read_article(&store, "gamma", 250).unwrap();
        assert_eq!(newest.previous.map(|l| l.slug).as_deref(), Some("beta"));
        assert!(newest.next.is_none());
    }

    #[test]
    fn test_read_draft_is_not_found_and_uncounted() {
        let store = seeded();
        assert!(matches!(
            read_article(&store, "draft", 250),
            Err(ReadError::NotFound)
        ));
        assert_eq!(views_of(&store, "draft"), 0);
    }

    #[test]
    fn test_read_unknown_or_empty_slug() {
        let store = seeded();
        assert!(matches!(read_article(&store, "nope", 250), Err(ReadError::NotFound)));
        assert!(matches!(read_article(&store, "", 250), Err(ReadError::NotFound)));
    }
}
