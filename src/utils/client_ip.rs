//! Client IP extraction for click tracking.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Resolves the client IP address recorded with a click.
///
/// With `behind_proxy` enabled, the first address in `X-Forwarded-For` wins,
/// then `X-Real-IP`; unparsable header values are ignored. Otherwise, and as
/// the fallback, the peer socket address is used. Enable `behind_proxy` only
/// when a trusted reverse proxy sets these headers.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
/// assert_eq!(client_ip(&headers, peer, true), "203.0.113.7");
/// assert_eq!(client_ip(&headers, peer, false), "10.0.0.1");
/// ```
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());

        let real_ip = || {
            headers
                .get(X_REAL_IP)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<IpAddr>().ok())
        };

        if let Some(ip) = forwarded.or_else(real_ip) {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}
