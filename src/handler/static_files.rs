//! Static file serving module
//!
//! Resolves the request path, opens the asset and answers with a chunked
//! body. Failures become a status here and go no further.

use hyper::Response;

use crate::assets::AssetError;
use crate::config::AppState;
use crate::http::{self, ResponseBody, OPEN_FAILED_MESSAGE};
use crate::logger;

const PATH_TOO_LONG_MESSAGE: &str = "Requested path is too long";

/// Serve the asset named by `path`
pub async fn serve_asset(state: &AppState, path: &str) -> Response<ResponseBody> {
    let resource = match state.resolver.resolve(path) {
        Ok(resource) => resource,
        Err(e) => return error_response(&e),
    };

    match state.transmitter.open(&resource.physical_path).await {
        Ok(transfer) => {
            logger::log_debug(&format!(
                "Serving {} from {}",
                resource.logical_path,
                resource.physical_path.display()
            ));
            let body = transfer.into_body().into_response_body();
            http::build_asset_response(&resource, body)
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &AssetError) -> Response<ResponseBody> {
    match err {
        AssetError::NotFound { .. } => {
            logger::log_warning(&format!("Rejected request: {err}"));
            http::build_404_response()
        }
        AssetError::PathTooLong { .. } => {
            logger::log_warning(&format!("Rejected request: {err}"));
            http::build_500_response(PATH_TOO_LONG_MESSAGE)
        }
        AssetError::ResourceUnavailable { .. } | AssetError::TransferFailed { .. } => {
            logger::log_error(&err.to_string());
            http::build_500_response(OPEN_FAILED_MESSAGE)
        }
    }
}
