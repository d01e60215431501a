//! Per-label summaries of a segmentation volume.
//!
//! Every operation here is a single exhaustive scan with per-label
//! accumulators: O(voxel count) time, O(distinct labels) space, and no
//! mutation of the input.

// Volume extents fit comfortably in i32/i64; coordinate sums fit f64.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

use nalgebra::Vector3;

use crate::bounds::VoxelBounds;
use crate::label::{LabelMap, LabelValue};
use crate::volume::Volume;
use crate::voxel::VoxelCoord;

/// Computes the centroid of every segment in the volume.
///
/// The centroid of a label is the coordinate-wise mean of all voxels
/// holding that label, each axis independently rounded to the nearest
/// integer (half away from zero). Background voxels are skipped and never
/// appear as a key.
///
/// # Example
///
/// ```
/// use seg_volume::{centroids, Volume, VolumeShape, VoxelCoord};
///
/// // One slice; label 5 occupies the two ends of the first row.
/// let mut vol = Volume::filled(VolumeShape::new(1, 2, 3), 0u32);
/// *vol.get_mut(0, 0, 0).unwrap() = 5;
/// *vol.get_mut(0, 0, 2).unwrap() = 5;
///
/// let centers = centroids(&vol);
/// assert_eq!(centers.get(5), Some(&VoxelCoord::new(0, 0, 1)));
/// assert_eq!(centers.get(0), None);
/// ```
#[must_use]
pub fn centroids<L: LabelValue>(seg: &Volume<L>) -> LabelMap<L, VoxelCoord> {
    let shape = seg.shape();
    let mut sums: LabelMap<L, (Vector3<i64>, u64)> = LabelMap::new();

    for x in 0..shape.x {
        let plane = seg.slice(x);
        for y in 0..shape.y {
            for z in 0..shape.z {
                let v = plane[y * shape.z + z];
                if v.is_background() {
                    continue;
                }
                let (sum, count) = sums.get_or_insert_with(v, || (Vector3::zeros(), 0));
                *sum += Vector3::new(x as i64, y as i64, z as i64);
                *count += 1;
            }
        }
    }

    let mut out = LabelMap::new();
    for (label, &(sum, count)) in sums.iter() {
        let mean = sum.map(|s| s as f64 / count as f64);
        out.insert(
            label,
            VoxelCoord::new(
                mean.x.round() as i32,
                mean.y.round() as i32,
                mean.z.round() as i32,
            ),
        );
    }
    out
}

/// Computes the voxel count of every segment in the volume.
///
/// Background voxels are not counted and `0` never appears as a key.
#[must_use]
pub fn segment_sizes<L: LabelValue>(seg: &Volume<L>) -> LabelMap<L, u64> {
    let mut sizes: LabelMap<L, u64> = LabelMap::new();
    for &v in seg.data() {
        if v.is_background() {
            continue;
        }
        *sizes.get_or_insert_with(v, || 0) += 1;
    }
    sizes
}

/// Returns the distinct nonzero labels of the volume, sorted by their key
/// projection (ascending numeric order for integer labels).
#[must_use]
pub fn unique_labels<L: LabelValue>(seg: &Volume<L>) -> Vec<L> {
    let mut seen: LabelMap<L, ()> = LabelMap::new();
    for &v in seg.data() {
        if !v.is_background() {
            seen.get_or_insert_with(v, || ());
        }
    }
    let mut labels: Vec<L> = seen.labels().collect();
    labels.sort_unstable_by_key(|label| label.key());
    labels
}

/// Computes the inclusive bounding box of every segment in the volume.
///
/// # Example
///
/// ```
/// use seg_volume::{bounding_boxes, Volume, VolumeShape, VoxelCoord};
///
/// let mut vol = Volume::filled(VolumeShape::new(2, 3, 3), 0u32);
/// *vol.get_mut(0, 0, 0).unwrap() = 4;
/// *vol.get_mut(1, 2, 1).unwrap() = 4;
///
/// let boxes = bounding_boxes(&vol);
/// let bounds = boxes.get(4).unwrap();
/// assert_eq!(bounds.min, VoxelCoord::new(0, 0, 0));
/// assert_eq!(bounds.max, VoxelCoord::new(1, 2, 1));
/// ```
#[must_use]
pub fn bounding_boxes<L: LabelValue>(seg: &Volume<L>) -> LabelMap<L, VoxelBounds> {
    let shape = seg.shape();
    let mut boxes: LabelMap<L, VoxelBounds> = LabelMap::new();

    for x in 0..shape.x {
        let plane = seg.slice(x);
        for y in 0..shape.y {
            for z in 0..shape.z {
                let v = plane[y * shape.z + z];
                if v.is_background() {
                    continue;
                }
                let coord = VoxelCoord::new(x as i32, y as i32, z as i32);
                boxes
                    .get_or_insert_with(v, || VoxelBounds::from_point(coord))
                    .expand_to_include(coord);
            }
        }
    }
    boxes
}
