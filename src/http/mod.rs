//! HTTP protocol layer module
//!
//! Response bodies, cross-origin headers, content types and the status
//! builders shared by every handler.

pub mod body;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use body::{ChunkedBody, ResponseBody};
pub use response::{
    build_404_response, build_500_response, build_asset_response, build_json_error_response,
    build_json_response, build_preflight_response, OPEN_FAILED_MESSAGE,
};
