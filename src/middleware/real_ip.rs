//! Recovers the client address that a reverse proxy in front of the service
//! saw, from the headers the proxy adds.
//!
//! Only meaningful when every request reaches the service through a trusted
//! proxy; anyone able to talk to the service directly can forge these headers.

use std::net::IpAddr;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::extractors::client_addr::ResolvedClientIp;

const TRUE_CLIENT_IP: &str = "true-client-ip";
const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_FOR: &str = "x-forwarded-for";

pub async fn resolve_client_ip(
    State(trust_proxy_headers): State<bool>,
    mut request: Request,
    next: Next,
) -> Response {
    if trust_proxy_headers {
        if let Some(ip) = client_ip_from_headers(request.headers()) {
            debug!(client_ip = %ip, "Resolved client address from proxy headers.");
            request.extensions_mut().insert(ResolvedClientIp(ip));
        }
    }

    next.run(request).await
}

/// The first of `True-Client-IP`, `X-Real-IP` and `X-Forwarded-For` that is
/// present and non-empty decides; an unparseable value resolves nothing.
pub fn client_ip_from_headers(headers: &HeaderMap) -> Option<IpAddr> {
    let candidate = if let Some(ip) = header_str(headers, TRUE_CLIENT_IP) {
        ip
    } else if let Some(ip) = header_str(headers, X_REAL_IP) {
        ip
    } else {
        header_str(headers, X_FORWARDED_FOR)?.split(',').next()?
    };

    candidate.parse().ok()
}

/// Empty values count as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}
