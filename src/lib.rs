//! Request-handling core of the weather station's embedded web server
//!
//! Serves the dashboard's static assets in bounded chunks, answers the JSON
//! API with live sensor readings, and stamps every response with permissive
//! cross-origin headers.

pub mod assets;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
pub mod telemetry;
