//! HTTP response building module
//!
//! Every builder starts from [`cors::with_cors`], so no station response
//! leaves without the cross-origin headers.

use hyper::header::{CONTENT_ENCODING, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::body::{self, ResponseBody};
use super::cors;
use super::mime::{APPLICATION_JSON, DEFAULT_CONTENT_TYPE};
use crate::assets::FileResource;

/// Body of the 500 sent when an asset exists in the route table but the file
/// cannot be opened
pub const OPEN_FAILED_MESSAGE: &str = "Failed to read existing file";

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Build 200 response with a compact JSON body
pub fn build_json_response<T: Serialize>(value: &T) -> Response<ResponseBody> {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_json_error_response(StatusCode::INTERNAL_SERVER_ERROR, "serialization failed");
        }
    };

    cors::with_cors(Response::builder())
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(body::full(json))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(body::empty())
        })
}

/// Build JSON error response such as `{"error":"sensor read failed"}`
pub fn build_json_error_response(status: StatusCode, message: &str) -> Response<ResponseBody> {
    let json = serde_json::to_string(&ErrorBody { error: message })
        .unwrap_or_else(|_| String::from(r#"{"error":"internal error"}"#));

    cors::with_cors(Response::builder())
        .status(status)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(body::full(json))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(body::empty())
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build 500 Internal Server Error response
pub fn build_500_response(message: &'static str) -> Response<ResponseBody> {
    build_text_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Build preflight response, headers only
pub fn build_preflight_response() -> Response<ResponseBody> {
    cors::with_cors(Response::builder())
        .status(StatusCode::NO_CONTENT)
        .body(body::empty())
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(body::empty())
        })
}

/// Build 200 response for a resolved asset around its chunked body
pub fn build_asset_response(resource: &FileResource, body: ResponseBody) -> Response<ResponseBody> {
    let mut builder = cors::with_cors(Response::builder())
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, resource.content_type);

    if let Some(encoding) = resource.content_encoding {
        builder = builder.header(CONTENT_ENCODING, encoding);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        build_500_response(OPEN_FAILED_MESSAGE)
    })
}

fn build_text_response(status: StatusCode, message: &'static str) -> Response<ResponseBody> {
    cors::with_cors(Response::builder())
        .status(status)
        .header(CONTENT_TYPE, DEFAULT_CONTENT_TYPE)
        .body(body::full(message))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(body::full(message))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
