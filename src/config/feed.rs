//! `[feed]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[feed]` section in jotter.toml - rss feed of published articles.
///
/// # Example
/// ```toml
/// [feed]
/// enable = true
/// path = "rss.xml"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Serve the rss feed. Requires `[base].url`.
    #[serde(default = "defaults::r#false")]
    pub enable: bool,

    /// URL path the feed is served from, without the leading slash.
    #[serde(default = "defaults::feed::path")]
    #[educe(Default = defaults::feed::path())]
    pub path: String,
}
