//! Request Context
//!
//! Typed per-request data attached by the context middleware and read by
//! later middleware and handlers through request extensions.

use std::net::SocketAddr;

use axum::http::HeaderMap;

use crate::auth::AuthUser;
use crate::rate_limit::UNKNOWN_CLIENT;

/// Who is making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Identifier the rate limiter keys on
    pub client_id: String,
    /// Authenticated user, if any
    pub user: Option<AuthUser>,
}

impl RequestContext {
    pub fn new(client_id: impl Into<String>, user: Option<AuthUser>) -> Self {
        Self {
            client_id: client_id.into(),
            user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Derives the client identifier for a request.
///
/// With `trust_proxy` the proxy-set `X-Real-IP` wins, then the last
/// `X-Forwarded-For` hop (the one the proxy appended), then the socket peer.
/// Falls back to [`UNKNOWN_CLIENT`].
pub fn client_id_from_request(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_proxy: bool,
) -> String {
    if trust_proxy {
        if let Some(ip) = forwarded_ip(headers) {
            return ip;
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    // Earlier hops are client supplied
    let last_forwarded_hop = || {
        headers
            .get("x-forwarded-for")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.rsplit(',').map(str::trim).find(|ip| !ip.is_empty()))
    };

    real_ip.or_else(last_forwarded_hop).map(str::to_string)
}
