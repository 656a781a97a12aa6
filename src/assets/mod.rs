//! Static asset serving
//!
//! Resolution of request paths to files under the asset root, bounded path
//! composition, and chunked streaming of the opened file.

mod error;
mod path;
mod resolver;
mod transmitter;

pub use error::AssetError;
pub use path::{PathBuilder, MAX_PATH_LEN};
pub use resolver::{AssetResolver, FileResource, GZIP_ENCODING, GZIP_SUFFIX};
pub use transmitter::{ChunkedFileTransmitter, Transfer};
