//! Errors raised while loading or checking `jotter.toml`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{}`", .0.display())]
    Read(PathBuf, #[source] std::io::Error),

    #[error("invalid jotter.toml")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the blog cannot run with.
    #[error("[{field}] {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The database would be created in a directory that does not exist.
    #[error("database directory `{}` does not exist", .0.display())]
    DatabaseDir(PathBuf),
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_names_the_field() {
        let err = ConfigError::invalid("serve.workers", "must be at least 1");
        assert_eq!(err.to_string(), "[serve.workers] must be at least 1");
    }

    #[test]
    fn test_database_dir_message() {
        let err = ConfigError::DatabaseDir(PathBuf::from("/srv/missing"));
        assert_eq!(err.to_string(), "database directory `/srv/missing` does not exist");
    }
}
