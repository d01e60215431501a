//! Error types for volume kernels.

use crate::VolumeShape;

/// Errors that can occur during volume operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VolumeError {
    /// Two volumes required to share a shape do not.
    ///
    /// Reported before any voxel is mutated.
    #[error("volume shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Shape of the first volume passed to the operation.
        expected: VolumeShape,
        /// Shape of the volume that disagrees.
        actual: VolumeShape,
    },

    /// A buffer's length does not match the shape it was paired with.
    #[error("buffer of length {actual} cannot back a {shape} volume ({expected} voxels)")]
    InvalidLength {
        /// The requested shape.
        shape: VolumeShape,
        /// Voxel count the shape requires.
        expected: usize,
        /// Length of the provided buffer.
        actual: usize,
    },

    /// Paired relabeling encountered a (primary, secondary) label pair
    /// absent from its mapping.
    ///
    /// The primary volume is left untouched when this is returned; pairs
    /// are validated before any write.
    #[error("no relabel entry for primary label {primary} over secondary label {secondary}")]
    MissingPairedEntry {
        /// The primary volume's label at the offending voxel.
        primary: String,
        /// The secondary volume's label at the same voxel.
        secondary: String,
    },
}
