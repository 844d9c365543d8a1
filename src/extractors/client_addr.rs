use std::{
    convert::Infallible,
    net::{IpAddr, SocketAddr},
};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

/// Client address recovered from proxy headers by the real-ip middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedClientIp(pub IpAddr);

/// The caller's apparent address.
///
/// A proxy-resolved address (bare IP) takes precedence over the connection
/// peer (`ip:port`). Empty when the request carries neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ResolvedClientIp(ip)) = parts.extensions.get::<ResolvedClientIp>() {
            return Ok(ClientAddr(ip.to_string()));
        }

        // Goes through the extractor so `MockConnectInfo` is honoured too.
        let peer = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(addr)| addr.to_string())
            .unwrap_or_default();

        Ok(ClientAddr(peer))
    }
}
