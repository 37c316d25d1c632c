//! Render failures
//!
//! Only conditions that abort a render live here. A missing font degrades to
//! the built-in face and a row that still overflows after fitting is clamped,
//! so neither is an error.

use std::path::PathBuf;

/// Errors that stop a render before any output is written
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The background image path does not resolve
    #[error("could not find input file '{}'", .0.display())]
    InputNotFound(PathBuf),

    /// The background image exists but could not be decoded
    #[error("error loading image '{}': {source}", .path.display())]
    InputLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The finished sign could not be encoded in the requested format
    #[error("error encoding image '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The encoded sign could not be written to disk
    #[error("error writing image '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Whether the failure is the missing-input case
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::InputNotFound(_))
    }
}
