//! Request identity and the admin gate.
//!
//! Authentication happens upstream; an auth proxy forwards the signed-in
//! user's id in a header. The header is only believed on connections from
//! `[serve] trusted_proxies`, and the proxy must drop any copy of it sent by
//! the client. The blog only compares that id to the configured admin id.

use crate::http::HttpRequest;
use std::net::IpAddr;

/// Extracts the signed-in user's id from a request.
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self, request: &HttpRequest) -> Option<String>;
}

/// Reads the user id from a header set by the fronting auth proxy.
#[derive(Debug, Clone)]
pub struct HeaderIdentity {
    header: String,
    proxies: Vec<IpAddr>,
}

impl HeaderIdentity {
    pub fn new(header: impl Into<String>, proxies: Vec<IpAddr>) -> Self {
        Self {
            header: header.into(),
            proxies,
        }
    }
}

impl IdentityResolver for HeaderIdentity {
    fn resolve(&self, request: &HttpRequest) -> Option<String> {
        if !request.is_from(&self.proxies) {
            return None;
        }
        request
            .header(&self.header)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
    }
}

/// `true` only when both ids are present and equal.
///
/// An unconfigured admin id authorises nobody.
pub fn is_admin(identity: Option<&str>, admin_id: Option<&str>) -> bool {
    matches!((identity, admin_id), (Some(user), Some(admin)) if user == admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use std::net::Ipv4Addr;

    const PROXY: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    fn resolver() -> HeaderIdentity {
        HeaderIdentity::new("X-User-Id", vec![PROXY])
    }

    fn via_proxy(method: Method) -> HttpRequest {
        HttpRequest::new(method, "/").with_remote_addr(PROXY)
    }

    #[test]
    fn test_header_identity() {
        let req = via_proxy(Method::Patch).with_header("x-user-id", " user_42 ");
        assert_eq!(resolver().resolve(&req).as_deref(), Some("user_42"));
    }

    #[test]
    fn test_header_identity_missing_or_blank() {
        assert_eq!(resolver().resolve(&via_proxy(Method::Get)), None);

        let blank = via_proxy(Method::Get).with_header("X-User-Id", "  ");
        assert_eq!(resolver().resolve(&blank), None);
    }

    #[test]
    fn test_header_identity_ignored_from_untrusted_peer() {
        let direct = HttpRequest::new(Method::Patch, "/")
            .with_remote_addr(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5)))
            .with_header("X-User-Id", "admin");
        assert_eq!(resolver().resolve(&direct), None);

        let unknown_peer = HttpRequest::new(Method::Patch, "/").with_header("X-User-Id", "admin");
        assert_eq!(resolver().resolve(&unknown_peer), None);
    }

    #[test]
    fn test_is_admin() {
        assert!(is_admin(Some("u1"), Some("u1")));
        assert!(!is_admin(Some("u2"), Some("u1")));
        assert!(!is_admin(None, Some("u1")));
        assert!(!is_admin(Some("u1"), None));
        assert!(!is_admin(None, None));
    }
}
