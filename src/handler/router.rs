//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route lookup, dispatch, the
//! cross-origin headers and the access log.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hyper::body::Body;
use hyper::header::CONTENT_ENCODING;
use hyper::{Request, Response};

use super::{api, static_files, Endpoint};
use crate::config::AppState;
use crate::http::{self, cors, ResponseBody};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
///
/// Never fails: every outcome, including no matching route, is a response.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let endpoint = *state.routes.dispatch(&method, &path);
    logger::log_debug(&format!("{method} {path} -> {endpoint:?}"));

    let mut response = match endpoint {
        Endpoint::Hello => api::hello(),
        Endpoint::Weather => api::weather(&state.telemetry).await,
        Endpoint::StaticAsset => static_files::serve_asset(&state, &path).await,
        Endpoint::Preflight => http::build_preflight_response(),
        Endpoint::NotFound => {
            logger::log_warning(&format!("No route for {method} {path}"));
            http::build_404_response()
        }
    };
    cors::apply(response.headers_mut());

    if state.access_log {
        log_access(&response, peer_addr, method.as_str(), path, started);
    }

    Ok(response)
}

fn log_access(
    response: &Response<ResponseBody>,
    peer_addr: SocketAddr,
    method: &str,
    path: String,
    started: Instant,
) {
    let mut entry = AccessLogEntry::new(peer_addr.to_string(), method.to_string(), path);
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact();
    entry.content_encoding = response
        .headers()
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    logger::log_access(&entry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::telemetry::sim;
    use hyper::{Method, StatusCode};

    fn state() -> (tempfile::TempDir, Arc<AppState>) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        let mut config = Config::load_from("no-such-config-file").unwrap();
        config.assets.root = dir.path().display().to_string();
        config.logging.access_log = false;
        let bus = sim::simulated_bus(&config.sensors);
        let state = Arc::new(AppState::new(config, bus).unwrap());
        (dir, state)
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    fn peer() -> SocketAddr {
        "192.168.4.2:51000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_statuses() {
        let (_dir, state) = state();
        let cases = [
            (Method::GET, "/api/hello", StatusCode::OK),
            (Method::GET, "/api/weather", StatusCode::OK),
            (Method::GET, "/", StatusCode::OK),
            (Method::GET, "/?v=3", StatusCode::OK),
            (Method::GET, "/missing.css", StatusCode::INTERNAL_SERVER_ERROR),
            (Method::OPTIONS, "/api/weather", StatusCode::NO_CONTENT),
            (Method::POST, "/api/weather", StatusCode::NOT_FOUND),
            (Method::PUT, "/index.html", StatusCode::NOT_FOUND),
        ];

        for (method, uri, expected) in cases {
            let label = format!("{method} {uri}");
            let resp = handle_request(request(method, uri), Arc::clone(&state), peer())
                .await
                .unwrap();
            assert_eq!(resp.status(), expected, "{label}");
            assert_eq!(resp.headers()["access-control-allow-origin"], "*", "{label}");
            assert_eq!(
                resp.headers()["access-control-allow-methods"],
                "GET, POST, OPTIONS",
                "{label}"
            );
            assert_eq!(resp.headers()["access-control-allow-headers"], "Content-Type", "{label}");
        }
    }

    #[tokio::test]
    async fn test_access_log_entry_for_chunked_response() {
        let (_dir, state) = state();
        let resp = handle_request(request(Method::GET, "/"), Arc::clone(&state), peer())
            .await
            .unwrap();
        // Chunked bodies have no exact size, logged as "-"
        assert_eq!(resp.body().size_hint().exact(), None);
        log_access(&resp, peer(), "GET", "/".to_string(), Instant::now());
    }
}
