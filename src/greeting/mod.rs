//! Visitor welcome greeting.
//!
//! The visitor's address is geolocated and turned into a one-line welcome.
//! Any failure yields no greeting at all; the page never shows an error.

pub mod geo;
pub mod typewriter;

pub use geo::{GeoError, GeoInfo, GeoLocator, IpApiClient};
pub use typewriter::TYPE_DELAY;

use crate::log;
use std::net::IpAddr;

/// The welcome line for a located visitor.
pub fn greeting_message(info: &GeoInfo) -> String {
    format!(
        "Welcome back {}, it's good to see someone from {}, {}!",
        info.ip, info.city, info.country_name
    )
}

/// Greeting for the visitor at `ip`, or `None` when it cannot be located.
pub fn greet_visitor(locator: &dyn GeoLocator, ip: Option<IpAddr>) -> Option<String> {
    let Some(ip) = ip else {
        log!("greet"; "visitor address unknown");
        return None;
    };
    match locator.locate(ip) {
        Ok(info) => Some(greeting_message(&info)),
        Err(err) => {
            log!("greet"; "{err}");
            None
        }
    }
}
