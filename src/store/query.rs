//! Typed post queries.
//!
//! A [`PostQuery`] is a conjunction of [`Filter`]s with an optional sort and
//! limit. Backends compile it to their own SQL dialect.
//!
//! ```ignore
//! let latest = PostQuery::new()
//!     .filter(Filter::Published(true))
//!     .order(Order::CreatedDesc);
//! ```

use chrono::{DateTime, Utc};

/// A single predicate on the `posts` table.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Id(i64),
    Slug(String),
    Published(bool),
    /// `created_at` strictly before the given instant
    CreatedBefore(DateTime<Utc>),
    /// `created_at` strictly after the given instant
    CreatedAfter(DateTime<Utc>),
}

/// Sort order on `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    CreatedAsc,
    CreatedDesc,
}

/// Representation of a query over posts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostQuery {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<u32>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate; all predicates must hold.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Published posts, newest first.
    pub fn published() -> Self {
        Self::new()
            .filter(Filter::Published(true))
            .order(Order::CreatedDesc)
    }

    /// The published post with this slug.
    pub fn published_slug(slug: &str) -> Self {
        Self::new()
            .filter(Filter::Slug(slug.to_owned()))
            .filter(Filter::Published(true))
    }

    /// Nearest published post created strictly before `at`.
    pub fn previous_published(at: DateTime<Utc>) -> Self {
        Self::new()
            .filter(Filter::CreatedBefore(at))
            .filter(Filter::Published(true))
            .order(Order::CreatedDesc)
            .limit(1)
    }

    /// Nearest published post created strictly after `at`.
    pub fn next_published(at: DateTime<Utc>) -> Self {
        Self::new()
            .filter(Filter::CreatedAfter(at))
            .filter(Filter::Published(true))
            .order(Order::CreatedAsc)
            .limit(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_filters() {
        let q = PostQuery::new()
            .filter(Filter::Published(true))
            .filter(Filter::Id(3))
            .limit(5);
        assert_eq!(q.filters, vec![Filter::Published(true), Filter::Id(3)]);
        assert_eq!(q.limit, Some(5));
        assert_eq!(q.order, None);
    }

    #[test]
    fn test_neighbour_queries_sort_towards_the_anchor() {
        let at = Utc::now();
        assert_eq!(PostQuery::previous_published(at).order, Some(Order::CreatedDesc));
        assert_eq!(PostQuery::next_published(at).order, Some(Order::CreatedAsc));
        assert_eq!(PostQuery::next_published(at).limit, Some(1));
    }
}
