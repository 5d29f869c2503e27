//! `[database]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[database]` section in jotter.toml - where posts are stored.
///
/// # Example
/// ```toml
/// [database]
/// path = "~/blog/posts.db"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite database file, relative to the project root.
    /// A leading `~` is expanded to the home directory.
    #[serde(default = "defaults::database::path")]
    #[educe(Default = defaults::database::path())]
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_database_config_default() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
        "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("jotter.db"));
    }

    #[test]
    fn test_database_config_custom() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
            [database]
            path = "data/posts.db"
        "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("data/posts.db"));
    }
}
