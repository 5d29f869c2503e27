//! IP geolocation lookups.

use serde::Deserialize;
use std::net::{IpAddr, Ipv6Addr};
use thiserror::Error;

/// The three fields the greeting needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeoInfo {
    pub ip: String,
    pub city: String,
    pub country_name: String,
}

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("geolocation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geolocation response invalid: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered but declined, e.g. rate limit or reserved address.
    #[error("geolocation refused: {0}")]
    Refused(String),

    /// Loopback, private and link-local addresses say nothing about a visitor.
    #[error("{0} is not a public address")]
    Unlocatable(IpAddr),
}

/// Something that can place a visitor's address on the map.
pub trait GeoLocator: Send + Sync {
    fn locate(&self, ip: IpAddr) -> Result<GeoInfo, GeoError>;
}

/// Client for ipapi.co style services: `GET {endpoint}/{ip}/json/`.
#[derive(Debug, Clone)]
pub struct IpApiClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl IpApiClient {
    pub fn new(endpoint: &str) -> Result<Self, GeoError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("jotter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
        })
    }

    /// Locate the machine this runs on. Only meaningful from the command
    /// line; the server never greets a visitor with its own address.
    pub fn locate_own(&self) -> Result<GeoInfo, GeoError> {
        self.fetch(&format!("{}/json/", self.endpoint))
    }

    fn url(&self, ip: IpAddr) -> Result<String, GeoError> {
        if !is_public(&ip) {
            return Err(GeoError::Unlocatable(ip));
        }
        Ok(format!("{}/{ip}/json/", self.endpoint))
    }

    fn fetch(&self, url: &str) -> Result<GeoInfo, GeoError> {
        let body: serde_json::Value = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json()?;
        parse_response(body)
    }
}

impl GeoLocator for IpApiClient {
    fn locate(&self, ip: IpAddr) -> Result<GeoInfo, GeoError> {
        self.fetch(&self.url(ip)?)
    }
}

/// ipapi.co reports failures as `200 {"error": true, "reason": "..."}`.
fn parse_response(body: serde_json::Value) -> Result<GeoInfo, GeoError> {
    if body.get("error").and_then(serde_json::Value::as_bool) == Some(true) {
        let reason = body
            .get("reason")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown reason");
        return Err(GeoError::Refused(reason.to_owned()));
    }
    Ok(serde_json::from_value(body)?)
}

/// Loopback, private, link-local and unspecified addresses are not
/// locatable.
fn is_public(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            !(v4.is_loopback() || v4.is_private() || v4.is_link_local() || v4.is_unspecified())
        }
        IpAddr::V6(v6) => !(v6.is_loopback() || v6.is_unspecified() || is_local_v6(v6)),
    }
}

/// Unique-local (fc00::/7) and link-local (fe80::/10) ranges.
fn is_local_v6(ip: &Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> IpApiClient {
        IpApiClient::new("https://geo.example/").unwrap()
    }

    #[test]
    fn test_url_for_public_address() {
        let ip: IpAddr = "8.8.8.8".parse().unwrap();
        assert_eq!(client().url(ip).unwrap(), "https://geo.example/8.8.8.8/json/");
    }

    #[test]
    fn test_locate_refuses_unlocatable_address() {
        // answered before any request is sent, so the endpoint is never hit
        let client = IpApiClient::new("http://127.0.0.1:9").unwrap();
        for ip in ["127.0.0.1", "10.1.2.3", "192.168.0.7", "::1", "fd00::1", "fe80::1"] {
            let ip: IpAddr = ip.parse().unwrap();
            let err = client.locate(ip).unwrap_err();
            assert!(matches!(err, GeoError::Unlocatable(addr) if addr == ip), "{ip}");
        }
    }

    #[test]
    fn test_parse_response() {
        let info = parse_response(json!({
            "ip": "8.8.8.8",
            "city": "Mountain View",
            "country_name": "United States",
            "region": "California"
        }))
        .unwrap();
        assert_eq!(
            info,
            GeoInfo {
                ip: "8.8.8.8".into(),
                city: "Mountain View".into(),
                country_name: "United States".into(),
            }
        );
    }

    #[test]
    fn test_parse_response_refused() {
        let err = parse_response(json!({ "error": true, "reason": "RateLimited" })).unwrap_err();
        assert!(matches!(err, GeoError::Refused(ref r) if r == "RateLimited"));
    }

    #[test]
    fn test_parse_response_missing_field() {
        let err = parse_response(json!({ "ip": "8.8.8.8", "city": "X" })).unwrap_err();
        assert!(matches!(err, GeoError::Json(_)));
    }
}
