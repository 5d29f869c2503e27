//! `[render]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[render]` section in jotter.toml - page rendering settings.
///
/// # Example
/// ```toml
/// [render]
/// minify = false
/// words_per_minute = 200
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Minify rendered HTML pages.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Reading speed used for the "N minute read" estimate.
    #[serde(default = "defaults::render::words_per_minute")]
    #[educe(Default = defaults::render::words_per_minute())]
    pub words_per_minute: u32,
}
