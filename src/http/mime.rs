//! MIME type detection module
//!
//! Returns the Content-Type for a path by suffix match against a fixed,
//! ordered table. The first matching suffix wins.

pub const APPLICATION_JSON: &str = "application/json";
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

const CONTENT_TYPES: [(&str, &str); 5] = [
    (".html", "text/html"),
    (".css", "text/css"),
    (".js", "application/javascript"),
    (".ico", "image/x-icon"),
    (".svg", "image/svg+xml"),
];

/// Get MIME Content-Type for a logical asset path
///
/// # Examples
/// ```
/// use weather_station::http::mime::get_content_type;
/// assert_eq!(get_content_type("/index.html"), "text/html");
/// assert_eq!(get_content_type("/vendor/chart.js"), "application/javascript");
/// assert_eq!(get_content_type("/README"), "text/plain");
/// ```
pub fn get_content_type(path: &str) -> &'static str {
    CONTENT_TYPES
        .iter()
        .find(|&&(suffix, _)| path.ends_with(suffix))
        .map_or(DEFAULT_CONTENT_TYPE, |&(_, content_type)| content_type)
}
