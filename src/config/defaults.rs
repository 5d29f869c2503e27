//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "user@noreply.jotter".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }

    pub fn avatar() -> String {
        "/avatar.jpg".into()
    }
}

// ============================================================================
// [database] Section Defaults
// ============================================================================

pub mod database {
    use std::path::PathBuf;

    pub fn path() -> PathBuf {
        "jotter.db".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }

    pub fn workers() -> usize {
        4
    }

    pub fn trusted_proxies() -> Vec<IpAddr> {
        vec![IpAddr::V4(Ipv4Addr::LOCALHOST), IpAddr::V6(Ipv6Addr::LOCALHOST)]
    }
}

// ============================================================================
// [render] Section Defaults
// ============================================================================

pub mod render {
    pub fn words_per_minute() -> u32 {
        250
    }
}

// ============================================================================
// [admin] Section Defaults
// ============================================================================

pub mod admin {
    pub fn env() -> String {
        "ADMIN_ID".into()
    }

    pub fn header() -> String {
        "X-User-Id".into()
    }
}

// ============================================================================
// [greeting] Section Defaults
// ============================================================================

pub mod greeting {
    pub fn endpoint() -> String {
        "https://ipapi.co".into()
    }
}

// ============================================================================
// [feed] Section Defaults
// ============================================================================

pub mod feed {
    pub fn path() -> String {
        "feed.xml".into()
    }
}
