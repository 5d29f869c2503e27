//! `[serve]` section: where the blog listens and which peers it believes.

use super::{defaults, error::ConfigError};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// `[serve]` section in jotter.toml.
///
/// ```toml
/// [serve]
/// interface = "0.0.0.0"
/// port = 3000
/// workers = 8
/// trusted_proxies = ["127.0.0.1", "10.0.0.2"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Literal IP address to bind; host names are rejected.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Request loops running side by side, at least one.
    #[serde(default = "defaults::serve::workers")]
    #[educe(Default = defaults::serve::workers())]
    pub workers: usize,

    /// Peers whose `X-Forwarded-For` and identity headers are believed.
    /// The proxy in front must drop client-supplied copies of both.
    #[serde(default = "defaults::serve::trusted_proxies")]
    #[educe(Default = defaults::serve::trusted_proxies())]
    pub trusted_proxies: Vec<IpAddr>,
}

impl ServeConfig {
    pub fn interface_addr(&self) -> Result<IpAddr, ConfigError> {
        self.interface.parse().map_err(|_| {
            ConfigError::invalid(
                "serve.interface",
                format!("`{}` is not an IP address", self.interface),
            )
        })
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        self.interface_addr()?;
        if self.workers == 0 {
            return Err(ConfigError::invalid("serve.workers", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_defaults_trust_only_loopback() {
        let serve = ServeConfig::default();
        assert_eq!(
            serve.trusted_proxies,
            [IpAddr::V4(Ipv4Addr::LOCALHOST), IpAddr::V6(Ipv6Addr::LOCALHOST)]
        );
        assert!(serve.check().is_ok());
    }

    #[test]
    fn test_interface_must_be_an_address() {
        let mut serve = ServeConfig {
            interface: "::1".into(),
            ..Default::default()
        };
        assert_eq!(serve.interface_addr().unwrap(), IpAddr::V6(Ipv6Addr::LOCALHOST));

        serve.interface = "localhost".into();
        let err = serve.check().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "serve.interface", .. }));
    }

    #[test]
    fn test_needs_a_worker() {
        let serve = ServeConfig {
            workers: 0,
            ..Default::default()
        };
        let err = serve.check().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "serve.workers", .. }));
    }

    #[test]
    fn test_trusted_proxies_from_toml() {
        let serve: ServeConfig = toml::from_str(r#"trusted_proxies = ["10.0.0.2"]"#).unwrap();
        assert_eq!(serve.trusted_proxies, [IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2))]);

        assert!(toml::from_str::<ServeConfig>(r#"trusted_proxies = ["proxy.lan"]"#).is_err());
        assert!(toml::from_str::<ServeConfig>("threads = 2").is_err());
    }
}
