//! Post persistence.
//!
//! The rest of the application talks to the database only through the
//! [`PostStore`] trait and typed [`PostQuery`] values; [`SqliteStore`] maps
//! them to SQL.
//!
//! # Write paths
//!
//! | Operation          | Caller                         |
//! |--------------------|--------------------------------|
//! | `increment_views`  | article reader, once per view  |
//! | `update`           | admin update endpoint          |
//! | `insert`           | `jotter init`, tests           |
//!
//! There is no delete.

mod error;
mod post;
mod query;
mod sqlite;

pub use error::{Result, StoreError};
pub use post::{NewPost, Post, PostChanges, PostLink};
pub use query::{Filter, Order, PostQuery};
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

/// Storage backend for posts.
///
/// Implementations must be shareable between request workers.
pub trait PostStore: Send + Sync {
    /// All posts matching the query, in the query's order.
    fn find(&self, query: &PostQuery) -> Result<Vec<Post>>;

    /// First post matching the query.
    fn first(&self, query: &PostQuery) -> Result<Option<Post>> {
        let query = query.clone().limit(1);
        Ok(self.find(&query)?.into_iter().next())
    }

    /// Atomically add one view and return the stored count afterwards.
    fn increment_views(&self, id: i64) -> Result<i64>;

    /// Overwrite the admin-editable fields of a post and stamp `updated_at`.
    fn update(&self, id: i64, changes: &PostChanges, updated_at: DateTime<Utc>) -> Result<()>;

    /// Insert a new post and return it as stored.
    fn insert(&self, post: &NewPost) -> Result<Post>;
}
