//! Request handler module
//!
//! The station's route table and the handlers it dispatches to.

pub mod api;
pub mod router;
pub mod static_files;

use hyper::Method;

use crate::routing::{RouteError, Router};

// Re-export main entry point
pub use router::handle_request;

/// Handler selected by the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Hello,
    Weather,
    StaticAsset,
    Preflight,
    NotFound,
}

/// Build the station's route table
///
/// Exact API routes win over the static wildcard; anything unmatched goes to
/// [`Endpoint::NotFound`].
pub fn build_routes() -> Result<Router<Endpoint>, RouteError> {
    Ok(Router::builder()
        .route(Method::GET, "/api/hello", Endpoint::Hello)?
        .route(Method::GET, "/api/weather", Endpoint::Weather)?
        .route(Method::GET, "/*", Endpoint::StaticAsset)?
        .route(Method::OPTIONS, "/*", Endpoint::Preflight)?
        .build(Endpoint::NotFound))
}
