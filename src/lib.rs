//! Landing Server - marketing page web server
//!
//! Serves a landing page and a small placeholder API behind an in-memory
//! fixed-window rate limiter, with an LRU/TTL response cache for handler
//! results.

pub mod api;
pub mod auth;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::{Config, Environment};
pub use tasks::spawn_cleanup_task;
