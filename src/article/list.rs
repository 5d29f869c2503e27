//! Article index.

use crate::store::{Post, PostStore, PostQuery, Result};

/// Every published post, newest first.
pub fn list_articles(store: &dyn PostStore) -> Result<Vec<Post>> {
    store.find(&PostQuery::published())
}
