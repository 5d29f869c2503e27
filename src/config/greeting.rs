//! `[greeting]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[greeting]` section in jotter.toml - the visitor welcome message.
///
/// # Example
/// ```toml
/// [greeting]
/// enable = true
/// endpoint = "https://ipapi.co"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct GreetingConfig {
    /// Show the welcome greeting on pages.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Base URL of the geolocation service.
    #[serde(default = "defaults::greeting::endpoint")]
    #[educe(Default = defaults::greeting::endpoint())]
    pub endpoint: String,
}
