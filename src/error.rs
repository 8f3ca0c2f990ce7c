//! Error types for chunkfig.

use thiserror::Error;

/// Everything that can go wrong between a built figure and a file on disk.
#[derive(Error, Debug)]
pub enum FigureError {
    /// The drawing backend rejected an operation or failed to encode the image.
    #[error("drawing error: {0}")]
    Drawing(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FigureError {
    pub(crate) fn drawing(e: impl std::fmt::Display) -> Self {
        FigureError::Drawing(e.to_string())
    }
}

/// A specialized Result type for chunkfig operations.
pub type Result<T> = std::result::Result<T, FigureError>;
