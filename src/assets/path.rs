//! Bounded physical path composition
//!
//! Physical paths are composed in a fixed-capacity buffer. A push that does
//! not fit is rejected whole, so a truncated path can never be opened.

use std::path::PathBuf;

use super::AssetError;

/// Capacity of the physical path buffer in bytes
pub const MAX_PATH_LEN: usize = 128;

#[derive(Debug, Default, Clone)]
pub struct PathBuilder {
    buf: heapless::String<MAX_PATH_LEN>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `part`, or fail without modifying the buffer
    pub fn push(&mut self, part: &str) -> Result<&mut Self, AssetError> {
        self.buf
            .push_str(part)
            .map_err(|()| AssetError::PathTooLong {
                limit: MAX_PATH_LEN,
            })?;
        Ok(self)
    }

    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_path_buf(self) -> PathBuf {
        PathBuf::from(self.buf.as_str())
    }
}
