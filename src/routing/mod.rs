//! Routing module
//!
//! Provides the request router:
//! - Exact and trailing-wildcard path patterns
//! - Per-method route registry built once at startup
//! - Deterministic resolution with a not-found fallback

mod matcher;
mod registry;

pub use matcher::RoutePattern;
pub use registry::{RouteEntry, RouteError, RouteNotMatched, Router, RouterBuilder};
