//! Dense 3D segmentation-volume kernels.
//!
//! This crate is the numeric core of a segmentation pipeline: a small set
//! of in-place kernels over dense 3D label volumes, where element value
//! `0` means background and any nonzero value is a segment label.
//!
//! - **Describe**: per-segment [`centroids`], [`segment_sizes`],
//!   [`unique_labels`], and [`bounding_boxes`].
//! - **Relabel**: flat [`relabel`] and pair-keyed [`relabel_paired`]
//!   rewriting, plus size/id filtering built on top.
//! - **Overlap**: [`count_overlaps`] between two segmentations and
//!   [`split_by_overlap`] segment splitting.
//! - **Distance**: [`manhattan_distance_2d`], a two-pass chamfer
//!   approximation of the within-slice Manhattan distance that also
//!   propagates each voxel's nearest label.
//! - **Dilate**: [`dilate_by_k`], distance-threshold dilation of every
//!   segment.
//! - **Surfaces**: [`label_surfaces_3d`] / [`label_surfaces_2d`].
//!
//! Volumes are caller-owned buffers; kernels mutate them in place and
//! never allocate volume-shaped storage beyond transient per-label
//! accumulators. All operations are synchronous and single-threaded.
//! Element types are the closed set `{u32, f32}` via the sealed
//! [`LabelValue`] trait, so unsupported types fail to compile instead of
//! failing at run time.
//!
//! # Example
//!
//! ```
//! use seg_volume::{centroids, dilate_by_k, Volume, VolumeShape, VoxelCoord};
//!
//! // A 5x5 slice with one labeled voxel in the middle.
//! let shape = VolumeShape::new(1, 5, 5);
//! let mut seg = Volume::filled(shape, 0u32);
//! *seg.get_mut(0, 2, 2).unwrap() = 42;
//!
//! assert_eq!(centroids(&seg).get(42), Some(&VoxelCoord::new(0, 2, 2)));
//!
//! // Grow the segment by one Manhattan step within the slice.
//! let mut dists = Volume::filled(shape, 0u32);
//! dilate_by_k(&mut seg, &mut dists, 1).unwrap();
//! assert_eq!(seg.get(0, 2, 1), Some(&42));
//! assert_eq!(seg.get(0, 0, 0), Some(&0));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod describe;
mod dilate;
mod distance;
mod error;
mod label;
mod overlap;
mod relabel;
mod surface;
mod volume;
mod voxel;

pub use bounds::VoxelBounds;
pub use describe::{bounding_boxes, centroids, segment_sizes, unique_labels};
pub use dilate::dilate_by_k;
pub use distance::{UNREACHED, manhattan_distance_2d};
pub use error::VolumeError;
pub use label::{LabelMap, LabelValue, PairedRelabelMap, RelabelMap};
pub use overlap::{count_overlaps, split_by_overlap};
pub use relabel::{filter_segments_by_id, filter_segments_by_size, relabel, relabel_paired};
pub use surface::{label_surfaces_2d, label_surfaces_3d};
pub use volume::{Volume, VolumeShape};
pub use voxel::VoxelCoord;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
