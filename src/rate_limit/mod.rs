//! Rate Limit Module
//!
//! In-memory, per-process, fixed-window request limiting keyed by client
//! identifier.

mod entry;
mod limiter;
mod shared;


pub use entry::RateLimitEntry;
pub use limiter::{
    Decision, RateLimitPolicy, RateLimiter, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS,
    UNKNOWN_CLIENT,
};
pub use shared::SharedRateLimiter;
