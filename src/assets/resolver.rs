//! Static asset resolver
//!
//! Maps a request path to a [`FileResource`] under the asset root:
//! 1. `/` resolves to the default document
//! 2. Scripts under the vendor prefix resolve to their precompressed `.gz`
//!    variant, served with `content-encoding: gzip`
//! 3. Anything else is the asset root joined with the request path
//!
//! Clients are assumed to accept gzip for vendor scripts; `Accept-Encoding`
//! is not consulted.

use std::path::PathBuf;

use super::path::PathBuilder;
use super::AssetError;
use crate::config::AssetConfig;
use crate::http::mime;

pub const GZIP_SUFFIX: &str = ".gz";
pub const GZIP_ENCODING: &str = "gzip";

/// A resolved asset, derived per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    /// Path as seen by the client, default document substituted for `/`
    pub logical_path: String,
    pub physical_path: PathBuf,
    pub content_type: &'static str,
    pub content_encoding: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: String,
    default_document: String,
    vendor_prefix: String,
    script_extension: String,
}

impl AssetResolver {
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            root: config.root.trim_end_matches('/').to_string(),
            default_document: config.default_document.trim_start_matches('/').to_string(),
            vendor_prefix: config.vendor_prefix.clone(),
            script_extension: config.script_extension.clone(),
        }
    }

    pub fn resolve(&self, request_path: &str) -> Result<FileResource, AssetError> {
        let path = strip_query(request_path);
        if !is_servable(path) {
            return Err(AssetError::NotFound {
                path: request_path.to_string(),
            });
        }

        let mut physical = PathBuilder::new();
        physical.push(&self.root)?;

        let (logical_path, content_encoding) = if path == "/" {
            physical.push("/")?.push(&self.default_document)?;
            (format!("/{}", self.default_document), None)
        } else if self.is_vendor_script(path) {
            physical.push(path)?.push(GZIP_SUFFIX)?;
            (path.to_string(), Some(GZIP_ENCODING))
        } else {
            physical.push(path)?;
            (path.to_string(), None)
        };

        Ok(FileResource {
            content_type: mime::get_content_type(&logical_path),
            logical_path,
            physical_path: physical.into_path_buf(),
            content_encoding,
        })
    }

    fn is_vendor_script(&self, path: &str) -> bool {
        path.starts_with(&self.vendor_prefix) && path.ends_with(&self.script_extension)
    }
}

/// Drop any query string or fragment
fn strip_query(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |end| &path[..end])
}

/// Absolute, no parent segments, no backslashes or NUL bytes
fn is_servable(path: &str) -> bool {
    path.starts_with('/')
        && !path.contains(['\\', '\0'])
        && !path.split('/').any(|segment| segment == "..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MAX_PATH_LEN;

    fn resolver() -> AssetResolver {
        AssetResolver::new(&AssetConfig {
            root: "/www".to_string(),
            default_document: "index.html".to_string(),
            vendor_prefix: "/vendor/".to_string(),
            script_extension: ".js".to_string(),
            chunk_size: 1024,
        })
    }

    #[test]
    fn test_root_resolves_to_default_document() {
        let resource = resolver().resolve("/").unwrap();
        assert_eq!(resource.physical_path, PathBuf::from("/www/index.html"));
        assert_eq!(resource.logical_path, "/index.html");
        assert_eq!(resource.content_type, "text/html");
        assert_eq!(resource.content_encoding, None);
    }

    #[test]
    fn test_root_ignores_query_suffix() {
        for target in ["/?v=2", "/?", "/#top", "/?a=1&b=/etc/passwd"] {
            let resource = resolver().resolve(target).unwrap();
            assert_eq!(resource.physical_path, PathBuf::from("/www/index.html"), "{target}");
        }
    }

    #[test]
    fn test_vendor_script_uses_gzip_variant() {
        let resource = resolver().resolve("/vendor/app.js").unwrap();
        assert_eq!(resource.physical_path, PathBuf::from("/www/vendor/app.js.gz"));
        assert_eq!(resource.content_encoding, Some("gzip"));
        assert_eq!(resource.content_type, "application/javascript");
    }

    #[test]
    fn test_script_outside_vendor_served_plain() {
        let resource = resolver().resolve("/app.js").unwrap();
        assert_eq!(resource.physical_path, PathBuf::from("/www/app.js"));
        assert_eq!(resource.content_encoding, None);
        assert_eq!(resource.content_type, "application/javascript");
    }

    #[test]
    fn test_vendor_non_script_served_plain() {
        let resource = resolver().resolve("/vendor/theme.css").unwrap();
        assert_eq!(resource.physical_path, PathBuf::from("/www/vendor/theme.css"));
        assert_eq!(resource.content_encoding, None);
        assert_eq!(resource.content_type, "text/css");
    }

    #[test]
    fn test_input_not_mutated() {
        let request = String::from("/vendor/app.js");
        let _ = resolver().resolve(&request).unwrap();
        assert_eq!(request, "/vendor/app.js");
    }

    #[test]
    fn test_traversal_rejected() {
        for bad in ["/../etc/passwd", "/vendor/../../secret", "/a\\b", "relative.html"] {
            assert!(
                matches!(resolver().resolve(bad), Err(AssetError::NotFound { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_path_too_long() {
        let long = format!("/{}.html", "a".repeat(MAX_PATH_LEN));
        assert!(matches!(
            resolver().resolve(&long),
            Err(AssetError::PathTooLong { limit: MAX_PATH_LEN })
        ));
    }

    #[test]
    fn test_gzip_suffix_counts_toward_limit() {
        // "/www" + path fills the buffer exactly; ".gz" no longer fits
        let name_len = MAX_PATH_LEN - "/www/vendor/".len() - ".js".len();
        let path = format!("/vendor/{}.js", "a".repeat(name_len));
        assert!(matches!(
            resolver().resolve(&path),
            Err(AssetError::PathTooLong { .. })
        ));

        let plain = format!("/{}.js", "a".repeat(name_len));
        assert!(resolver().resolve(&plain).is_ok());
    }

    #[test]
    fn test_trailing_slash_root() {
        let resolver = AssetResolver::new(&AssetConfig {
            root: "/www/".to_string(),
            default_document: "index.html".to_string(),
            vendor_prefix: "/vendor/".to_string(),
            script_extension: ".js".to_string(),
            chunk_size: 1024,
        });
        let resource = resolver.resolve("/style.css").unwrap();
        assert_eq!(resource.physical_path, PathBuf::from("/www/style.css"));
    }
}
