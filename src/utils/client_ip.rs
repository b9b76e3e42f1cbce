use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Obtém o IP real do cliente: primeiro hop do `X-Forwarded-For`, senão o peer TCP.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty());

    match forwarded {
        Some(first) => Some(first.to_string()),
        None => peer.map(|addr| addr.ip().to_string()),
    }
}
