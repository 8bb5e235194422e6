//! Errors raised while drawing or persisting a flag.

use std::path::PathBuf;

use flag_common::FlagError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RenderError> for FlagError {
    fn from(err: RenderError) -> Self {
        FlagError::Render(err.to_string())
    }
}
