//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use axum::{
    extract::State,
    http::Method,
    response::{Html, Redirect},
    Extension, Json,
};
use serde_json::Value;

use super::context::RequestContext;
use super::state::AppState;
use crate::error::{AppError, Result};
use crate::models::{
    AuthActionResponse, AuthStatusResponse, CacheHealth, DashboardResponse, HealthResponse,
};

/// Cache key for the memoized dashboard summary.
pub const DASHBOARD_CACHE_KEY: &str = "dashboard:summary";

/// Static marketing page served for every unmatched GET.
pub const LANDING_PAGE: &str = include_str!("landing.html");

/// Handler for GET /health and GET /api/health
///
/// Reports process status and response cache occupancy.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.cache.stats().await;
    Json(HealthResponse::ok(
        state.config.environment,
        CacheHealth::from(&stats),
    ))
}

/// Handler for GET /api/auth/user and GET /api/auth
pub async fn auth_user_handler(
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<AuthStatusResponse>> {
    ctx.user
        .map(|user| Json(AuthStatusResponse::authenticated(user)))
        .ok_or(AppError::Unauthenticated)
}

/// Handler for POST /api/auth
///
/// Placeholder sign-in that always succeeds.
pub async fn auth_action_handler() -> Json<AuthActionResponse> {
    Json(AuthActionResponse::success("Authentication successful"))
}

/// Handler for GET /api/login
pub async fn login_handler() -> Redirect {
    Redirect::to("/dashboard")
}

/// Handler for GET /api/logout
pub async fn logout_handler() -> Redirect {
    Redirect::to("/")
}

/// Handler for GET /api/dashboard
///
/// The summary is built once and then served from the response cache until
/// its TTL runs out.
pub async fn dashboard_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let summary = state
        .cache
        .get_or_compute(DASHBOARD_CACHE_KEY, None, || async {
            serde_json::to_value(DashboardResponse::operational())
                .map_err(|e| AppError::Internal(e.to_string()))
        })
        .await?;

    Ok(Json(summary))
}

/// Fallback for unmatched routes.
///
/// GET and HEAD get the landing page, anything else is 404.
pub async fn fallback_handler(method: Method) -> Result<Html<&'static str>> {
    if method == Method::GET || method == Method::HEAD {
        Ok(Html(LANDING_PAGE))
    } else {
        Err(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use crate::clock::ManualClock;
    use crate::config::Config;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn test_state() -> (AppState, ManualClock) {
        let clock = ManualClock::new(0);
        let state = AppState::with_clock(&Config::default(), Arc::new(clock.clone()));
        (state, clock)
    }

    #[tokio::test]
    async fn test_health_handler_reports_cache() {
        let (state, _clock) = test_state();

        let response = health_handler(State(state)).await;

        assert_eq!(response.status, "ok");
        assert_eq!(response.cache, CacheHealth { size: 0, max: 1000 });
    }

    #[tokio::test]
    async fn test_auth_user_handler() {
        let ctx = RequestContext::new("127.0.0.1", Some(AuthUser::demo()));
        let response = assert_ok!(auth_user_handler(Extension(ctx)).await);
        assert!(response.authenticated);
        assert_eq!(response.user.id, "demo-user");

        let anonymous = RequestContext::new("127.0.0.1", None);
        let err = assert_err!(auth_user_handler(Extension(anonymous)).await);
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_dashboard_handler_is_memoized() {
        let (state, clock) = test_state();

        assert_ok!(dashboard_handler(State(state.clone())).await);
        assert_ok!(dashboard_handler(State(state.clone())).await);

        let stats = state.cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.size, 1);

        // Recomputed once the default TTL has passed
        clock.advance(state.config.cache_default_ttl_ms + 1);
        let Json(summary) = assert_ok!(dashboard_handler(State(state.clone())).await);
        assert_eq!(summary["status"], "operational");
        assert_eq!(state.cache.stats().await.misses, 2);
    }

    #[tokio::test]
    async fn test_auth_action_handler() {
        let response = auth_action_handler().await;
        assert!(response.success);
    }

    #[tokio::test]
    async fn test_fallback_handler() {
        let Html(page) = assert_ok!(fallback_handler(Method::GET).await);
        assert!(page.starts_with("<!DOCTYPE html>"));

        assert_err!(fallback_handler(Method::POST).await);
    }
}
