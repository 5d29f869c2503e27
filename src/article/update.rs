//! Admin edits of post metadata.

use crate::auth;
use crate::store::{PostChanges, PostStore, StoreError};
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

/// JSON body of `PATCH /api/article/update`.
///
/// ```json
/// {"id": 1, "title": "…", "description": "…", "slug": "…", "tag": "…", "published": true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateRequest {
    pub id: i64,
    #[serde(flatten)]
    pub changes: PostChanges,
}

#[derive(Debug, Error)]
pub enum UpdateError {
    /// Caller is not the admin, or no admin is configured.
    #[error("unauthorized")]
    Unauthorized,

    #[error("malformed update body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Apply an admin edit.
///
/// Authorisation is checked before the body is parsed, so a rejected
/// caller never touches the store.
pub fn update_article(
    store: &dyn PostStore,
    identity: Option<&str>,
    admin_id: Option<&str>,
    body: &[u8],
) -> Result<(), UpdateError> {
    if !auth::is_admin(identity, admin_id) {
        return Err(UpdateError::Unauthorized);
    }

    let request: UpdateRequest = serde_json::from_slice(body)?;
    store.update(request.id, &request.changes, Utc::now())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::tests::seeded;
    use crate::store::{Filter, Post, PostQuery};

    fn by_slug(store: &dyn PostStore, slug: &str) -> Option<Post> {
        store
            .first(&PostQuery::new().filter(Filter::Slug(slug.into())))
            .unwrap()
    }

    fn body(id: i64, slug: &str, published: bool) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "id": id,
            "title": "Edited",
            "description": "Edited description",
            "slug": slug,
            "tag": "edited",
            "published": published,
        }))
        .unwrap()
    }

    #[test]
    fn test_update_by_admin() {
        let store = seeded();
        let before = by_slug(&store, "alpha").unwrap();
        let started = Utc::now() - chrono::Duration::seconds(1);

        update_article(&store, Some("admin"), Some("admin"), &body(before.id, "alpha-2", true)).unwrap();

        assert!(by_slug(&store, "alpha").is_none());
        let after = by_slug(&store, "alpha-2").unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, "Edited");
        assert_eq!(after.description, "Edited description");
        assert_eq!(after.tag, "edited");
        assert!(after.updated_at.is_some_and(|at| at >= started));
        assert_eq!(after.content, before.content);
        assert_eq!(after.views, before.views);
    }

    #[test]
    fn test_update_can_unpublish() {
        let store = seeded();
        let id = by_slug(&store, "gamma").unwrap().id;
        update_article(&store, Some("admin"), Some("admin"), &body(id, "gamma", false)).unwrap();
        assert!(!by_slug(&store, "gamma").unwrap().published);
    }

    #[test]
    fn test_update_rejects_non_admin() {
        let store = seeded();
        let before = by_slug(&store, "alpha").unwrap();
        let payload = body(before.id, "alpha-2", true);

        for (identity, admin) in [
            (Some("intruder"), Some("admin")),
            (None, Some("admin")),
            (Some("admin"), None),
            (None, None),
        ] {
            let err = update_article(&store, identity, admin, &payload).unwrap_err();
            assert!(matches!(err, UpdateError::Unauthorized));
        }
        assert_eq!(by_slug(&store, "alpha").unwrap(), before);
    }

    #[test]
    fn test_unauthorized_wins_over_malformed_body() {
        let store = seeded();
        let err = update_article(&store, None, Some("admin"), b"not json").unwrap_err();
        assert!(matches!(err, UpdateError::Unauthorized));
    }

    #[test]
    fn test_update_malformed_body() {
        let store = seeded();
        let missing_field = br#"{"id": 1, "title": "t"}"#;
        let err = update_article(&store, Some("a"), Some("a"), missing_field).unwrap_err();
        assert!(matches!(err, UpdateError::Malformed(_)));
    }

    #[test]
    fn test_update_unknown_id() {
        let store = seeded();
        let err = update_article(&store, Some("a"), Some("a"), &body(999, "x", true)).unwrap_err();
        assert!(matches!(err, UpdateError::Store(StoreError::NotFound(999))));
    }

    #[test]
    fn test_update_slug_conflict() {
        let store = seeded();
        let id = by_slug(&store, "alpha").unwrap().id;
        let err = update_article(&store, Some("a"), Some("a"), &body(id, "beta", true)).unwrap_err();
        assert!(matches!(err, UpdateError::Store(StoreError::Conflict(_))));
    }

    #[test]
    fn test_update_request_shape() {
        let request: UpdateRequest = serde_json::from_slice(&body(3, "s", false)).unwrap();
        assert_eq!(request.id, 3);
        assert_eq!(request.changes.slug, "s");
        assert!(!request.changes.published);
    }
}
