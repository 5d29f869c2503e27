//! Site initialization module.
//!
//! Creates a new blog: default configuration, database schema and a first
//! published article.

use crate::{
    config::SiteConfig,
    log,
    store::{NewPost, PostStore, SqliteStore},
};
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Slug of the article every new blog starts with
const WELCOME_SLUG: &str = "hello-world";

const WELCOME_CONTENT: &str = "\
This is the first article of your new blog.

Articles live in the database next to your config. Every visit to an article \
page is counted, and the reading time is estimated from its length.

Edit titles, descriptions, slugs, tags and visibility through the admin update \
endpoint once an administrator identity is configured.";

/// Create a new blog at the configured root
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Safety check: if no name was provided (init in current dir),
    // the directory must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `jotter init <BLOG_NAME>` to create in a subdirectory."
        );
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_default_config(config)?;
    init_database(&config.database.path)?;
    init_ignored_files(root, &database_ignore_patterns(config))?;

    log!("init"; "{}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file, keeping the chosen database path
fn init_default_config(config: &SiteConfig) -> Result<()> {
    let mut defaults = SiteConfig::default();
    defaults.base.title = "My Blog".into();
    defaults.base.description = "Notes, essays and everything in between.".into();
    defaults.database.path = database_path_in_root(config);

    let content = toml::to_string_pretty(&defaults)?;
    fs::write(&config.config_path, content)
        .with_context(|| format!("Failed to write {}", config.config_path.display()))?;
    Ok(())
}

/// Create the schema and seed the welcome article
fn init_database(path: &Path) -> Result<()> {
    let store = SqliteStore::open(path)?;
    store.insert(&NewPost {
        description: "A first article to get started.".into(),
        tag: "meta".into(),
        ..NewPost::new(WELCOME_SLUG, "Hello, world", WELCOME_CONTENT)
    })?;
    Ok(())
}

/// Database path relative to the root when inside it, else as given
fn database_path_in_root(config: &SiteConfig) -> PathBuf {
    config
        .database
        .path
        .strip_prefix(config.get_root())
        .unwrap_or(&config.database.path)
        .to_path_buf()
}

/// The database file and its SQLite side files, relative to the root
fn database_ignore_patterns(config: &SiteConfig) -> Vec<String> {
    let db = database_path_in_root(config).to_string_lossy().into_owned();
    vec![db.clone(), format!("{db}-wal"), format!("{db}-shm"), format!("{db}-journal")]
}

/// Initialize .gitignore and .ignore files with specified patterns
fn init_ignored_files(root: &Path, patterns: &[String]) -> Result<()> {
    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
