//! Response DTOs for the web server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::auth::AuthUser;
use crate::cache::CacheStats;
use crate::config::Environment;

/// Cache size and capacity as reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheHealth {
    pub size: usize,
    pub max: usize,
}

impl From<&CacheStats> for CacheHealth {
    fn from(stats: &CacheStats) -> Self {
        Self {
            size: stats.size,
            max: stats.max,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Deployment mode
    pub environment: Environment,
    /// Response cache occupancy
    pub cache: CacheHealth,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn ok(environment: Environment, cache: CacheHealth) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            environment,
            cache,
        }
    }
}

/// Response body for GET /api/auth/user
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub user: AuthUser,
}

impl AuthStatusResponse {
    pub fn authenticated(user: AuthUser) -> Self {
        Self {
            authenticated: true,
            user,
        }
    }
}

/// Response body for POST /api/auth
#[derive(Debug, Clone, Serialize)]
pub struct AuthActionResponse {
    pub success: bool,
    pub message: String,
}

impl AuthActionResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Response body for GET /api/dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub status: String,
    pub features: Vec<String>,
}

impl DashboardResponse {
    /// The placeholder dashboard summary.
    pub fn operational() -> Self {
        Self {
            message: "CoRegulateAI Dashboard API".to_string(),
            status: "operational".to_string(),
            features: [
                "AI-Powered Coaching",
                "Wellness Analytics",
                "HIPAA Compliant",
                "Personalized Experience",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        }
    }
}
