//! Configuration Module
//!
//! Resolves every environment-dependent switch once at startup into a plain
//! struct that is passed to the rest of the server.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MS};
use crate::rate_limit::{RateLimitPolicy, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS};

// == Environment ==
/// Deployment mode. Selects the defaults for every feature switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables; defaults depend on
/// [`Environment`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment mode
    pub environment: Environment,
    /// HTTP server port
    pub server_port: u16,
    /// Attach the demo user to every request
    pub mock_auth_enabled: bool,
    /// Reject unauthenticated requests to non-public `/api` routes
    pub require_auth: bool,
    /// Rate limit every route instead of only `/api` routes
    pub strict_rate_limit: bool,
    /// Add the security response headers
    pub security_headers: bool,
    /// Take the client identifier from `X-Real-IP` / the last `X-Forwarded-For` hop
    pub trust_proxy: bool,
    /// Rate limit window in milliseconds
    pub rate_limit_window_ms: u64,
    /// Requests admitted per client per window
    pub rate_limit_max_requests: u32,
    /// Maximum number of cached responses
    pub cache_max_entries: usize,
    /// Default cache TTL in milliseconds
    pub cache_default_ttl_ms: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Defaults for the given deployment mode.
    pub fn for_environment(environment: Environment) -> Self {
        let production = environment.is_production();
        Self {
            environment,
            server_port: 3000,
            mock_auth_enabled: !production,
            require_auth: production,
            strict_rate_limit: production,
            security_headers: production,
            trust_proxy: false,
            rate_limit_window_ms: DEFAULT_WINDOW_MS,
            rate_limit_max_requests: DEFAULT_MAX_REQUESTS,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            cache_default_ttl_ms: DEFAULT_TTL_MS,
            cleanup_interval: 60,
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `APP_ENV` - `development` or `production` (default: development)
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `MOCK_AUTH` - Inject the demo user (default: on in development)
    /// - `REQUIRE_AUTH` - Gate `/api` routes (default: on in production)
    /// - `STRICT_RATE_LIMIT` - Limit every route (default: on in production)
    /// - `SECURITY_HEADERS` - Add security headers (default: on in production)
    /// - `TRUST_PROXY` - Trust forwarding headers for client identity (default: off)
    /// - `RATE_LIMIT_WINDOW_MS` - Window length (default: 60000)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Quota per window (default: 100)
    /// - `CACHE_MAX_ENTRIES` - Cache capacity (default: 1000)
    /// - `CACHE_DEFAULT_TTL_MS` - Cache TTL (default: 300000)
    /// - `CLEANUP_INTERVAL` - Sweep interval in seconds (default: 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`.
    ///
    /// Unparseable values fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = parse(&lookup, "APP_ENV").unwrap_or(Environment::Development);
        let defaults = Self::for_environment(environment);

        Self {
            environment,
            server_port: parse(&lookup, "PORT").unwrap_or(defaults.server_port),
            mock_auth_enabled: flag(&lookup, "MOCK_AUTH").unwrap_or(defaults.mock_auth_enabled),
            require_auth: flag(&lookup, "REQUIRE_AUTH").unwrap_or(defaults.require_auth),
            strict_rate_limit: flag(&lookup, "STRICT_RATE_LIMIT")
                .unwrap_or(defaults.strict_rate_limit),
            security_headers: flag(&lookup, "SECURITY_HEADERS")
                .unwrap_or(defaults.security_headers),
            trust_proxy: flag(&lookup, "TRUST_PROXY").unwrap_or(defaults.trust_proxy),
            rate_limit_window_ms: parse(&lookup, "RATE_LIMIT_WINDOW_MS")
                .unwrap_or(defaults.rate_limit_window_ms),
            rate_limit_max_requests: parse(&lookup, "RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or(defaults.rate_limit_max_requests),
            cache_max_entries: parse(&lookup, "CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cache_default_ttl_ms: parse(&lookup, "CACHE_DEFAULT_TTL_MS")
                .unwrap_or(defaults.cache_default_ttl_ms),
            cleanup_interval: parse(&lookup, "CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Rate limit policy built from the window and quota settings.
    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            window_ms: self.rate_limit_window_ms,
            max_requests: self.rate_limit_max_requests,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn flag<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key)?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
