//! Client identity extraction from HTTP request metadata.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Identity used when neither headers nor the peer address are available.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Resolves the identity a request is rate-limited under.
///
/// Resolution order:
/// 1. First entry of `X-Forwarded-For` (only when `trust_forwarded`)
/// 2. `X-Real-IP` (only when `trust_forwarded`)
/// 3. IP of the socket peer
/// 4. [`UNKNOWN_IDENTITY`]
///
/// Forwarded headers are client-controlled; trust them only behind a reverse
/// proxy that overwrites them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_identity(&headers, None, true), "203.0.113.7");
/// ```
pub fn client_identity(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded: bool,
) -> String {
    if trust_forwarded {
        let forwarded = header_str(headers, X_FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded.or_else(|| header_str(headers, X_REAL_IP)) {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_IDENTITY.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
