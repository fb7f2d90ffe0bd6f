//! Response models for the web server API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into HTTP
//! response bodies.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    AuthActionResponse, AuthStatusResponse, CacheHealth, DashboardResponse, HealthResponse,
};
