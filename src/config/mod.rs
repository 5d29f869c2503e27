//! Site configuration management for `jotter.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[base]`     | Site metadata (title, author, url, avatar)     |
//! | `[database]` | Where posts are stored                         |
//! | `[serve]`    | HTTP server (interface, port, workers)         |
//! | `[render]`   | Page rendering (minify, reading speed)         |
//! | `[admin]`    | Admin identity source for the update endpoint  |
//! | `[greeting]` | Visitor welcome message                        |
//! | `[feed]`     | rss feed                                       |
//! | `[extra]`    | User-defined custom fields                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//!
//! [database]
//! path = "posts.db"
//!
//! [serve]
//! port = 5277
//!
//! [feed]
//! enable = true
//! ```

mod admin;
mod base;
mod database;
pub mod defaults;
mod error;
mod feed;
mod greeting;
mod handle;
mod render;
mod serve;

pub use handle::{cfg, init_config};

use admin::AdminConfig;
use base::BaseConfig;
use database::DatabaseConfig;
use error::ConfigError;
use feed::FeedConfig;
use greeting::GreetingConfig;
use render::RenderConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    net::IpAddr,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing jotter.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root; the database path is resolved against it
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Post storage
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Page rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Admin identity settings
    #[serde(default)]
    pub admin: AdminConfig,

    /// Visitor greeting settings
    #[serde(default)]
    pub greeting: GreetingConfig,

    /// rss feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load configuration for the given CLI invocation.
    ///
    /// Falls back to defaults when the config file does not exist yet
    /// (the caller decides whether that is acceptable), applies CLI
    /// overrides and resolves the admin identity from the environment.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.admin.resolve_id();

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = Some(path.to_path_buf())
    }

    /// Address the server binds to, as configured
    pub fn bind_addr(&self) -> Result<IpAddr> {
        Ok(self.serve.interface_addr()?)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        let root = Self::normalize_path(&root);
        self.set_root(&root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        Self::update_option(&mut self.database.path, cli.database.as_ref());
        self.database.path = self.resolve_database_path(&root);

        if let Commands::Serve {
            interface,
            port,
            workers,
            minify,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.workers, workers.as_ref());
            Self::update_option(&mut self.render.minify, minify.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Expand `~` and anchor a relative database path at the project root
    fn resolve_database_path(&self, root: &Path) -> PathBuf {
        let raw = self.database.path.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        if expanded.is_relative() {
            Self::normalize_path(&root.join(expanded))
        } else {
            Self::normalize_path(&expanded)
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before serving
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::invalid(
                "base.url",
                "must start with http:// or https://"
            ));
        }

        if self.feed.enable && self.base.url.is_none() {
            bail!(ConfigError::invalid("base.url", "is required by the rss feed"));
        }

        if let Some(dir) = self.database.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            bail!(ConfigError::DatabaseDir(dir.to_path_buf()));
        }

        self.serve.check()?;

        if self.render.words_per_minute == 0 {
            bail!(ConfigError::invalid("render.words_per_minute", "must be at least 1"));
        }

        if self.greeting.enable && !self.greeting.endpoint.starts_with("http") {
            bail!(ConfigError::invalid(
                "greeting.endpoint",
                "must start with http:// or https://"
            ));
        }

        let header = &self.admin.header;
        if header.is_empty()
            || !header
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            bail!(ConfigError::invalid(
                "admin.header",
                format!("`{header}` is not a valid header name")
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
