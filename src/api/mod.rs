//! API Module
//!
//! HTTP handlers, middleware and routing for the landing page server.
//!
//! # Endpoints
//! - `GET /health` - Health check with cache occupancy
//! - `GET /api/auth/user` - Current (mock) user
//! - `GET /api/dashboard` - Cached dashboard summary
//! - `GET /*` - Landing page

pub mod context;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use context::RequestContext;
pub use handlers::*;
pub use routes::create_router;
pub use state::AppState;
