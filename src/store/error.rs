//! Store error types.

use thiserror::Error;

/// Errors raised by a [`PostStore`](super::PostStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Sqlite error {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Post {0} not found")]
    NotFound(i64),

    #[error("Slug `{0}` is already taken")]
    Conflict(String),

    #[error("IO error {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        assert_eq!(StoreError::NotFound(7).to_string(), "Post 7 not found");
        assert_eq!(
            StoreError::Conflict("hello".into()).to_string(),
            "Slug `hello` is already taken"
        );
    }
}
