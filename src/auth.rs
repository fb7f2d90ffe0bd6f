//! Authentication Stub
//!
//! There is no credential system here. An [`Authenticator`] decides which
//! user, if any, a request belongs to; the only implementations are a mock
//! that always answers with the demo user and one that never authenticates.
//! A real identity provider plugs in behind the same trait.

use std::fmt;
use std::sync::Arc;

use axum::http::HeaderMap;
use serde::Serialize;

use crate::config::Config;

// == Auth User ==
/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub role: String,
}

impl AuthUser {
    /// The placeholder user served by [`MockAuthenticator`].
    pub fn demo() -> Self {
        Self {
            id: "demo-user".to_string(),
            username: "CoRegulateAI User".to_string(),
            first_name: "Demo".to_string(),
            role: "user".to_string(),
        }
    }
}

// == Authenticator Trait ==
/// Resolves the user behind a request from its headers.
pub trait Authenticator: Send + Sync + fmt::Debug {
    fn authenticate(&self, headers: &HeaderMap) -> Option<AuthUser>;
}

/// Authenticates every request as a fixed user.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    user: AuthUser,
}

impl MockAuthenticator {
    pub fn new(user: AuthUser) -> Self {
        Self { user }
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(AuthUser::demo())
    }
}

impl Authenticator for MockAuthenticator {
    fn authenticate(&self, _headers: &HeaderMap) -> Option<AuthUser> {
        Some(self.user.clone())
    }
}

/// Never authenticates anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthenticator;

impl Authenticator for NoAuthenticator {
    fn authenticate(&self, _headers: &HeaderMap) -> Option<AuthUser> {
        None
    }
}

/// Picks the authenticator matching `config.mock_auth_enabled`.
pub fn authenticator_for(config: &Config) -> Arc<dyn Authenticator> {
    if config.mock_auth_enabled {
        Arc::new(MockAuthenticator::default())
    } else {
        Arc::new(NoAuthenticator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[test]
    fn test_mock_authenticator_returns_demo_user() {
        let user = MockAuthenticator::default().authenticate(&HeaderMap::new());
        assert_eq!(user, Some(AuthUser::demo()));
    }

    #[test]
    fn test_no_authenticator_returns_none() {
        assert_eq!(NoAuthenticator.authenticate(&HeaderMap::new()), None);
    }

    #[test]
    fn test_authenticator_follows_config() {
        let dev = authenticator_for(&Config::for_environment(Environment::Development));
        let prod = authenticator_for(&Config::for_environment(Environment::Production));

        assert!(dev.authenticate(&HeaderMap::new()).is_some());
        assert!(prod.authenticate(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let json = serde_json::to_value(AuthUser::demo()).unwrap();
        assert_eq!(json["id"], "demo-user");
        assert_eq!(json["firstName"], "Demo");
        assert_eq!(json["role"], "user");
    }
}
