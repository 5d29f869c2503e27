//! Transport-independent request and response values.
//!
//! The server converts `tiny_http` requests into [`HttpRequest`] before
//! routing, so handlers and their tests never touch a socket.

use serde::Serialize;
use std::net::IpAddr;
pub use tiny_http::Method;

/// Path of the not-found page every miss redirects to.
pub const NOT_FOUND_PATH: &str = "/404";

/// An incoming request, fully buffered.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Raw request target, may carry a query string
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Socket peer address
    pub remote_addr: Option<IpAddr>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
            remote_addr: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Path without query string, trailing slash removed (except for `/`).
    pub fn path(&self) -> &str {
        let path = self.url.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        }
    }

    /// `true` when the socket peer is one of `proxies`.
    pub fn is_from(&self, proxies: &[IpAddr]) -> bool {
        self.remote_addr.is_some_and(|peer| proxies.contains(&peer))
    }

    /// Visitor address.
    ///
    /// The first `X-Forwarded-For` hop is believed only from a trusted proxy;
    /// anyone else gets their socket peer address.
    pub fn client_ip(&self, proxies: &[IpAddr]) -> Option<IpAddr> {
        if !self.is_from(proxies) {
            return self.remote_addr;
        }
        self.header("X-Forwarded-For")
            .and_then(|hops| hops.split(',').next())
            .and_then(|first| first.trim().parse().ok())
            .or(self.remote_addr)
    }
}

/// An outgoing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub location: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    fn new(status: u16, content_type: Option<&'static str>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            location: None,
            body,
        }
    }

    pub fn html(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, Some("text/html; charset=utf-8"), body.into())
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self::new(status, Some("text/plain; charset=utf-8"), body.as_bytes().to_vec())
    }

    pub fn xml(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, Some("application/rss+xml; charset=utf-8"), body.into())
    }

    /// JSON response; serialization of plain data types does not fail.
    pub fn json<T: Serialize + ?Sized>(status: u16, value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        Self::new(status, Some("application/json"), body)
    }

    pub fn no_content() -> Self {
        Self::new(204, None, Vec::new())
    }

    /// Temporary redirect, method preserved.
    pub fn redirect(location: &str) -> Self {
        Self {
            location: Some(location.to_owned()),
            ..Self::new(307, None, Vec::new())
        }
    }

    pub fn not_found_redirect() -> Self {
        Self::redirect(NOT_FOUND_PATH)
    }

    pub fn method_not_allowed() -> Self {
        Self::text(405, "Method Not Allowed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_path_strips_query_and_trailing_slash() {
        assert_eq!(HttpRequest::new(Method::Get, "/articles/?t=1").path(), "/articles");
        assert_eq!(HttpRequest::new(Method::Get, "/").path(), "/");
        assert_eq!(HttpRequest::new(Method::Get, "/?x").path(), "/");
        assert_eq!(HttpRequest::new(Method::Get, "/article/a#top").path(), "/article/a");
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let req = HttpRequest::new(Method::Get, "/").with_header("x-user-id", "user_1");
        assert_eq!(req.header("X-User-Id"), Some("user_1"));
        assert_eq!(req.header("X-Other"), None);
    }

    const PROXY: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn test_client_ip_prefers_forwarded_for_from_proxy() {
        let req = HttpRequest::new(Method::Get, "/")
            .with_remote_addr(PROXY)
            .with_header("X-Forwarded-For", "203.0.113.9, 10.0.0.1");
        assert_eq!(req.client_ip(&[PROXY]), Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn test_client_ip_ignores_forwarded_for_from_strangers() {
        let peer = IpAddr::V4(Ipv4Addr::new(198, 51, 100, 4));
        let req = HttpRequest::new(Method::Get, "/")
            .with_remote_addr(peer)
            .with_header("X-Forwarded-For", "203.0.113.9");
        assert_eq!(req.client_ip(&[PROXY]), Some(peer));
        assert_eq!(req.client_ip(&[]), Some(peer));
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let req = HttpRequest::new(Method::Get, "/")
            .with_remote_addr(PROXY)
            .with_header("X-Forwarded-For", "garbage");
        assert_eq!(req.client_ip(&[PROXY]), Some(PROXY));
        assert_eq!(HttpRequest::new(Method::Get, "/").client_ip(&[PROXY]), None);
    }

    #[test]
    fn test_redirect_response() {
        let resp = HttpResponse::not_found_redirect();
        assert_eq!(resp.status, 307);
        assert_eq!(resp.location.as_deref(), Some("/404"));
        assert!(resp.body.is_empty());
    }

    #[test]
    fn test_json_response() {
        let resp = HttpResponse::json(200, &serde_json::json!({ "status": 200 }));
        assert_eq!(resp.content_type, Some("application/json"));
        assert_eq!(resp.body, br#"{"status":200}"#);
    }
}
