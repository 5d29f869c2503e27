//! `[admin]` section configuration.
//!
//! The administrator identity itself never lives in the config file: it is
//! read from the environment variable named by `env` when the config loads.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[admin]` section in jotter.toml - who may edit posts.
///
/// # Example
/// ```toml
/// [admin]
/// env = "JOTTER_ADMIN"         # variable holding the admin user id
/// header = "X-Forwarded-User"  # set by the upstream auth proxy
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Environment variable holding the administrator identity.
    #[serde(default = "defaults::admin::env")]
    #[educe(Default = defaults::admin::env())]
    pub env: String,

    /// Request header carrying the identity resolved by the auth proxy.
    #[serde(default = "defaults::admin::header")]
    #[educe(Default = defaults::admin::header())]
    pub header: String,

    /// Administrator identity, resolved from `env` at load time.
    #[serde(skip)]
    pub id: Option<String>,
}

impl AdminConfig {
    /// Read the administrator identity from the configured variable.
    ///
    /// Unset or blank values leave the admin identity empty, which
    /// authorises nobody.
    pub fn resolve_id(&mut self) {
        self.id = std::env::var(&self.env)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
    }
}
