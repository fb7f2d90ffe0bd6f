//! Request Pipeline Middleware
//!
//! Runs in this order for every request:
//! 1. `request_context` - resolves client identity and user
//! 2. `rate_limit` - fixed-window quota per client
//! 3. `block_dev_endpoints` - hides development routes in production
//! 4. `require_auth` - gates non-public `/api` routes

use std::any::Any;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::context::{client_id_from_request, RequestContext};
use super::state::AppState;
use crate::error::{AppError, Result};
use crate::rate_limit::{Decision, UNKNOWN_CLIENT};

/// `/api` routes reachable without a user when auth is required.
pub const PUBLIC_API_PATHS: &[&str] = &[
    "/api/health",
    "/api/auth/user",
    "/api/login",
    "/api/logout",
    "/api/auth/google",
    "/api/auth/callback",
];

/// Requests left in the client's current window, set on admitted responses.
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Routes that answer 404 in production.
pub const DEV_ONLY_PATHS: &[&str] = &["/api/dev", "/api/test", "/api/debug", "/api/seed"];

/// Attaches a [`RequestContext`] to the request extensions.
pub async fn request_context(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_id = client_id_from_request(request.headers(), peer, state.config.trust_proxy);
    let user = state.authenticator.authenticate(request.headers());

    request
        .extensions_mut()
        .insert(RequestContext::new(client_id, user));
    next.run(request).await
}

/// Rejects clients over their quota with 429.
///
/// Without `strict_rate_limit` only `/api` routes count. Admitted responses
/// carry [`RATE_LIMIT_REMAINING`].
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if !state.config.strict_rate_limit && !is_api_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let client_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.client_id.clone())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    match state.limiter.check(&client_id).await {
        Decision::Allow { remaining } => {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert(RATE_LIMIT_REMAINING, HeaderValue::from(remaining));
            Ok(response)
        }
        Decision::Reject { retry_after_secs } => {
            warn!(
                client_id = %client_id,
                path = %request.uri().path(),
                retry_after_secs,
                "Rate limit exceeded"
            );
            Err(AppError::RateLimited {
                retry_after: retry_after_secs,
            })
        }
    }
}

/// Answers 404 for development-only routes in production.
pub async fn block_dev_endpoints(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let blocked = state.config.environment.is_production()
        && DEV_ONLY_PATHS
            .iter()
            .any(|prefix| matches_prefix(request.uri().path(), prefix));

    if blocked {
        return Err(AppError::NotFound);
    }
    Ok(next.run(request).await)
}

/// Answers 401 for protected `/api` routes when no user is attached.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let path = request.uri().path();
    let protected = state.config.require_auth
        && is_api_path(path)
        && !PUBLIC_API_PATHS
            .iter()
            .any(|prefix| matches_prefix(path, prefix));

    if protected {
        let authenticated = request
            .extensions()
            .get::<RequestContext>()
            .is_some_and(RequestContext::is_authenticated);
        if !authenticated {
            return Err(AppError::AuthenticationRequired);
        }
    }

    Ok(next.run(request).await)
}

/// Converts a handler panic into the generic 500 response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

fn is_api_path(path: &str) -> bool {
    matches_prefix(path, "/api")
}

/// True when `path` is `prefix` or sits below it (`/api/dev/x` but not `/api/devices`).
fn matches_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
