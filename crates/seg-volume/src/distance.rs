//! Per-slice approximate Manhattan distance transform with nearest-label
//! propagation.

use tracing::debug;

use crate::error::VolumeError;
use crate::label::LabelValue;
use crate::volume::{Volume, ensure_same_shape};

/// The distance value meaning no segment is reachable: no nonzero voxel
/// exists anywhere in the voxel's slice.
pub const UNREACHED: u32 = u32::MAX;

/// Computes, for every voxel, the approximate Manhattan distance to the
/// nearest segment within its x-slice, propagating that segment's label.
///
/// Mutating `seg` is part of the contract, not a side effect to work
/// around: after the call, every background voxel of `seg` whose slice
/// contains at least one segment holds the label of a nearest segment,
/// and `dists` holds its distance. Originally nonzero voxels keep their
/// label and get distance 0. Voxels in segment-free slices keep label 0
/// and distance [`UNREACHED`].
///
/// The transform is a two-pass chamfer sweep over each y-by-z plane:
/// a forward pass (y then z ascending) comparing against the row and
/// column predecessors, then a backward pass (y then z descending)
/// comparing against the row and column successors. Propagation never
/// crosses x-slices. The result is the standard chamfer approximation of
/// the within-slice Manhattan distance; equidistant sources tie-break by
/// sweep order.
///
/// The previous contents of `dists` are ignored and fully overwritten.
///
/// # Errors
///
/// Returns [`VolumeError::ShapeMismatch`] if the volumes differ in shape;
/// neither volume is mutated in that case.
///
/// # Example
///
/// ```
/// use seg_volume::{manhattan_distance_2d, Volume, VolumeShape};
///
/// let shape = VolumeShape::new(1, 1, 4);
/// let mut seg = Volume::from_vec(shape, vec![9u32, 0, 0, 0]).unwrap();
/// let mut dists = Volume::filled(shape, 0u32);
///
/// manhattan_distance_2d(&mut seg, &mut dists).unwrap();
/// assert_eq!(dists.data(), &[0, 1, 2, 3]);
/// assert_eq!(seg.data(), &[9, 9, 9, 9]);
/// ```
pub fn manhattan_distance_2d<L: LabelValue>(
    seg: &mut Volume<L>,
    dists: &mut Volume<u32>,
) -> Result<(), VolumeError> {
    ensure_same_shape(seg.shape(), dists.shape())?;
    let shape = seg.shape();
    let (ny, nz) = (shape.y, shape.z);
    debug!(shape = %shape, "per-slice manhattan distance transform");

    for x in 0..shape.x {
        let s = seg.slice_mut(x);
        let d = dists.slice_mut(x);

        // Forward pass, initialization folded in. The comparison is
        // against the neighbour's distance itself (not distance + 1): on
        // a tie the neighbour's label is re-adopted, which fixes the
        // sweep-order tie-break.
        for y in 0..ny {
            for z in 0..nz {
                let i = y * nz + z;
                d[i] = if s[i].is_background() { UNREACHED } else { 0 };

                if y > 0 && d[i - nz] < d[i] {
                    d[i] = d[i - nz] + 1;
                    s[i] = s[i - nz];
                }
                if z > 0 && d[i - 1] < d[i] {
                    d[i] = d[i - 1] + 1;
                    s[i] = s[i - 1];
                }
            }
        }

        // Backward pass.
        for y in (0..ny).rev() {
            for z in (0..nz).rev() {
                let i = y * nz + z;

                if y + 1 < ny && d[i + nz] < d[i] {
                    d[i] = d[i + nz] + 1;
                    s[i] = s[i + nz];
                }
                if z + 1 < nz && d[i + 1] < d[i] {
                    d[i] = d[i + 1] + 1;
                    s[i] = s[i + 1];
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::volume::VolumeShape;
    use crate::voxel::VoxelCoord;

    #[test]
    fn center_voxel_yields_true_manhattan_distances() {
        let shape = VolumeShape::new(1, 3, 3);
        let mut seg = Volume::filled(shape, 0u32);
        *seg.get_mut(0, 1, 1).unwrap() = 7;
        let mut dists = Volume::filled(shape, 0u32);

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();

        #[rustfmt::skip]
        assert_eq!(dists.data(), &[
            2, 1, 2,
            1, 0, 1,
            2, 1, 2,
        ]);
        assert!(seg.data().iter().all(|&v| v == 7));
    }

    #[test]
    fn segment_voxels_have_distance_zero() {
        let shape = VolumeShape::new(1, 2, 2);
        let mut seg = Volume::from_vec(shape, vec![3u32, 3, 3, 3]).unwrap();
        let original = seg.clone();
        let mut dists = Volume::filled(shape, 99u32);

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();
        assert_eq!(dists.data(), &[0, 0, 0, 0]);
        assert_eq!(seg, original);
    }

    #[test]
    fn distances_match_offset_from_source() {
        let shape = VolumeShape::new(1, 4, 5);
        let mut seg = Volume::filled(shape, 0u32);
        *seg.get_mut(0, 0, 0).unwrap() = 2;
        let mut dists = Volume::filled(shape, 0u32);

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();

        let source = VoxelCoord::new(0, 0, 0);
        for y in 0..4 {
            for z in 0..5 {
                let here = VoxelCoord::new(0, y, z);
                let got = *dists.get(0, y as usize, z as usize).unwrap();
                assert_eq!(got, source.manhattan_distance(here));
            }
        }
    }

    #[test]
    fn labels_tie_break_by_sweep_order() {
        let shape = VolumeShape::new(1, 1, 4);
        let mut seg = Volume::from_vec(shape, vec![1u32, 0, 0, 2]).unwrap();
        let mut dists = Volume::filled(shape, 0u32);

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();
        assert_eq!(dists.data(), &[0, 1, 1, 0]);
        assert_eq!(seg.data(), &[1, 1, 2, 2]);
    }

    #[test]
    fn backward_pass_readopts_on_equal_distance() {
        // The middle voxel is distance 1 from both segments; the backward
        // sweep re-adopts the right-hand label, matching the fixed sweep
        // order.
        let shape = VolumeShape::new(1, 1, 3);
        let mut seg = Volume::from_vec(shape, vec![1u32, 0, 2]).unwrap();
        let mut dists = Volume::filled(shape, 0u32);

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();
        assert_eq!(dists.data(), &[0, 1, 0]);
        assert_eq!(seg.data(), &[1, 2, 2]);
    }

    #[test]
    fn empty_slice_stays_unreached() {
        let shape = VolumeShape::new(2, 2, 2);
        let mut seg = Volume::filled(shape, 0u32);
        // Only slice 0 carries a segment.
        *seg.get_mut(0, 0, 0).unwrap() = 5;
        let mut dists = Volume::filled(shape, 0u32);

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();

        assert_eq!(dists.slice(0), &[0, 1, 1, 2]);
        assert_eq!(seg.slice(0), &[5, 5, 5, 5]);
        assert_eq!(dists.slice(1), &[UNREACHED; 4]);
        assert_eq!(seg.slice(1), &[0, 0, 0, 0]);
    }

    #[test]
    fn propagation_never_crosses_slices() {
        let shape = VolumeShape::new(2, 1, 2);
        let mut seg = Volume::from_vec(shape, vec![4u32, 0, 0, 0]).unwrap();
        let mut dists = Volume::filled(shape, 0u32);

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();

        // Slice 1 is adjacent along x but must not receive the label.
        assert_eq!(seg.slice(1), &[0, 0]);
        assert_eq!(dists.slice(1), &[UNREACHED, UNREACHED]);
    }

    #[test]
    fn float_labels_propagate() {
        let shape = VolumeShape::new(1, 1, 3);
        let mut seg = Volume::from_vec(shape, vec![1.5f32, 0.0, 0.0]).unwrap();
        let mut dists = Volume::filled(shape, 0u32);

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();
        assert_eq!(seg.data(), &[1.5, 1.5, 1.5]);
        assert_eq!(dists.data(), &[0, 1, 2]);
    }

    #[test]
    fn scratch_contents_are_ignored() {
        let shape = VolumeShape::new(1, 1, 2);
        let mut seg = Volume::from_vec(shape, vec![1u32, 0]).unwrap();
        let mut dists = Volume::from_vec(shape, vec![12345u32, 1]).unwrap();

        manhattan_distance_2d(&mut seg, &mut dists).unwrap();
        assert_eq!(dists.data(), &[0, 1]);
    }

    #[test]
    fn shape_mismatch_fails_before_mutation() {
        let mut seg = Volume::from_vec(VolumeShape::new(1, 1, 2), vec![1u32, 0]).unwrap();
        let original = seg.clone();
        let mut dists = Volume::filled(VolumeShape::new(1, 2, 2), 0u32);

        let err = manhattan_distance_2d(&mut seg, &mut dists).unwrap_err();
        assert!(matches!(err, VolumeError::ShapeMismatch { .. }));
        assert_eq!(seg, original);
    }
}
