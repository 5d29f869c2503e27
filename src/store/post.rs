//! The `Post` entity and its projections.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A blog post, as stored in the `posts` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    /// Unique URL key
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tag: String,
    /// Open Graph image URL
    pub image: Option<String>,
    /// Visibility gate for every read path
    pub published: bool,
    /// Page views, only ever incremented
    pub views: i64,
    pub created_at: DateTime<Utc>,
    /// Set on every admin edit
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Navigation projection of this post.
    pub fn link(&self) -> PostLink {
        PostLink {
            slug: self.slug.clone(),
            title: self.title.clone(),
        }
    }
}

/// Just enough of a post to link to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLink {
    pub slug: String,
    pub title: String,
}

/// Admin-editable fields, overwritten as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostChanges {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub tag: String,
    pub published: bool,
}

/// Insertion shape; `id`, `views` and `updated_at` are owned by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tag: String,
    pub image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// A published post with empty optional fields, created now.
    pub fn new(slug: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            content: content.into(),
            tag: String::new(),
            image: None,
            published: true,
            created_at: Utc::now(),
        }
    }
}
