//! Error types for skeletonization operations.

use thiserror::Error;

/// Result type alias for skeletonization operations.
pub type SkeletonResult<T> = Result<T, SkeletonError>;

/// Errors that can occur when constructing or feeding a voxel volume.
///
/// The thinning engine itself never fails: out-of-bounds reads resolve to
/// background and out-of-bounds writes are ignored. Errors only arise at the
/// public boundary, where malformed dimensions or buffers are rejected
/// before any scanning starts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SkeletonError {
    /// Every grid dimension must be at least 1.
    #[error("invalid grid dimensions: {width}x{height}x{depth}")]
    InvalidDimensions {
        /// Width dimension (x axis).
        width: usize,
        /// Height dimension (y axis).
        height: usize,
        /// Depth dimension (z axis).
        depth: usize,
    },

    /// The dimension product overflows voxel addressing.
    #[error("grid dimensions {width}x{height}x{depth} overflow addressing")]
    GridTooLarge {
        /// Width dimension (x axis).
        width: usize,
        /// Height dimension (y axis).
        height: usize,
        /// Depth dimension (z axis).
        depth: usize,
    },

    /// The supplied buffer does not match the declared dimensions.
    #[error("data length {actual} does not match grid volume {expected}")]
    DataSizeMismatch {
        /// Expected length (width × height × depth).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}
