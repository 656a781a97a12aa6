use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the static asset pipeline
#[derive(Debug, Error)]
pub enum AssetError {
    /// The request path cannot name an asset (traversal, malformed)
    #[error("no asset for request path {path:?}")]
    NotFound { path: String },

    #[error("physical path exceeds the {limit}-byte path buffer")]
    PathTooLong { limit: usize },

    /// Open failed; missing files and I/O errors are not told apart
    #[error("cannot open {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("transfer of {} failed: {source}", path.display())]
    TransferFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
