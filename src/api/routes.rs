//! API Routes
//!
//! Configures the Axum router with every endpoint and the middleware stack.

use axum::{
    http::{header, HeaderValue},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{
    auth_action_handler, auth_user_handler, dashboard_handler, fallback_handler, health_handler,
    login_handler, logout_handler,
};
use super::middleware::{block_dev_endpoints, handle_panic, rate_limit, request_context, require_auth};
use super::state::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health`, `GET /api/health` - Status and cache occupancy
/// - `GET /api/auth/user`, `GET /api/auth` - Current user
/// - `POST /api/auth` - Placeholder sign-in
/// - `GET /api/login`, `GET /api/logout` - Redirects
/// - `GET /api/dashboard` - Cached dashboard summary
/// - anything else - Landing page
///
/// # Middleware
/// - Tracing (outermost)
/// - Security headers, when enabled in the config
/// - Panic recovery
/// - CORS: Allows any origin
/// - Request context, rate limit, dev route blocking, auth gate
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Layers added later wrap the ones added earlier
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/api/auth/user", get(auth_user_handler))
        .route("/api/auth", get(auth_user_handler).post(auth_action_handler))
        .route("/api/login", get(login_handler))
        .route("/api/logout", get(logout_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .fallback(fallback_handler)
        .layer(from_fn_with_state(state.clone(), require_auth))
        .layer(from_fn_with_state(state.clone(), block_dev_endpoints))
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .layer(from_fn_with_state(state.clone(), request_context))
        .layer(cors);

    with_response_layers(router, state.config.security_headers).with_state(state)
}

/// Wraps `router` in panic recovery, then the optional security headers,
/// then request tracing.
///
/// Panic recovery sits inside the header layers: the 500 from a panicking
/// handler carries the security headers too.
fn with_response_layers(router: Router<AppState>, security_headers: bool) -> Router<AppState> {
    let mut router = router.layer(CatchPanicLayer::custom(handle_panic));

    if security_headers {
        router = router
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static("max-age=31536000; includeSubDomains"),
            ));
    }

    router.layer(TraceLayer::new_for_http())
}
