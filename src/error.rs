//! Error types for the flattening pipeline.

use thiserror::Error;

/// Errors surfaced to callers of the flattening and projection functions.
///
/// Every variant is an input-contract violation; nothing here is retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlattenError {
    /// The image is empty or smaller than the 3x3 neighborhood the
    /// boundary resolver needs.
    #[error("invalid input shape ({height}, {width}): flattening needs at least 3x3 cells")]
    InvalidInputShape {
        /// Number of rows in the rejected image.
        height: usize,
        /// Number of columns in the rejected image.
        width: usize,
    },
    /// The height-image projection was asked for an impossible raster.
    #[error("invalid projection: {0}")]
    InvalidProjection(String),
}
