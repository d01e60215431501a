//! Overlap counting between two segmentations, and overlap-driven
//! segment splitting.

use tracing::debug;

use crate::describe::unique_labels;
use crate::error::VolumeError;
use crate::label::{LabelMap, LabelValue, PairedRelabelMap, RelabelMap};
use crate::relabel::relabel_paired;
use crate::volume::{Volume, ensure_same_shape};

/// Counts the overlapping voxels for every pair of segments.
///
/// A voxel contributes to the count for `(a, b)` when `first` holds the
/// nonzero label `a` and `second` holds the nonzero label `b` at the same
/// position. Pairs with no overlap do not appear.
///
/// # Errors
///
/// Returns [`VolumeError::ShapeMismatch`] if the volumes differ in shape.
///
/// # Example
///
/// ```
/// use seg_volume::{count_overlaps, Volume, VolumeShape};
///
/// let first = Volume::from_vec(VolumeShape::new(1, 1, 4), vec![1u32, 1, 2, 0]).unwrap();
/// let second = Volume::from_vec(VolumeShape::new(1, 1, 4), vec![7u32, 7, 0, 7]).unwrap();
///
/// let counts = count_overlaps(&first, &second).unwrap();
/// assert_eq!(counts.get(1).unwrap().get(7), Some(&2));
/// assert!(counts.get(2).is_none());
/// ```
pub fn count_overlaps<L: LabelValue>(
    first: &Volume<L>,
    second: &Volume<L>,
) -> Result<LabelMap<L, LabelMap<L, u64>>, VolumeError> {
    ensure_same_shape(first.shape(), second.shape())?;

    let mut counts: LabelMap<L, LabelMap<L, u64>> = LabelMap::new();
    for (&a, &b) in first.data().iter().zip(second.data()) {
        if a.is_background() || b.is_background() {
            continue;
        }
        let inner = counts.get_or_insert_with(a, LabelMap::new);
        *inner.get_or_insert_with(b, || 0) += 1;
    }
    Ok(counts)
}

/// Splits every segment of `seg` by its overlap with `overlap`, in place.
///
/// Each (segment, overlapping-segment) pair receives a fresh label, so a
/// segment straddling several segments of `overlap` falls apart into one
/// piece per partner. Fresh labels are minted as consecutive ids starting
/// at 1, assigned in ascending (segment, partner) key order, so the
/// result is deterministic. Voxels of a segment that lie on background in
/// `overlap` are reset to background.
///
/// # Errors
///
/// Returns [`VolumeError::ShapeMismatch`] if the volumes differ in shape.
///
/// # Example
///
/// ```
/// use seg_volume::{split_by_overlap, Volume, VolumeShape};
///
/// // One segment covering four voxels, overlapped by two segments.
/// let mut seg = Volume::from_vec(VolumeShape::new(1, 1, 4), vec![5u32, 5, 5, 5]).unwrap();
/// let over = Volume::from_vec(VolumeShape::new(1, 1, 4), vec![1u32, 1, 2, 0]).unwrap();
///
/// split_by_overlap(&mut seg, &over).unwrap();
/// assert_eq!(seg.data(), &[1, 1, 2, 0]);
/// ```
pub fn split_by_overlap<L: LabelValue>(
    seg: &mut Volume<L>,
    overlap: &Volume<L>,
) -> Result<(), VolumeError> {
    let counts = count_overlaps(seg, overlap)?;

    let mut pairs: Vec<(L, L)> = Vec::new();
    for (segment, partners) in counts.iter() {
        for (partner, _) in partners.iter() {
            pairs.push((segment, partner));
        }
    }
    pairs.sort_unstable_by_key(|&(a, b)| (a.key(), b.key()));

    // Every segment gets an explicit background entry: voxels with no
    // overlap partner are erased rather than left to an implicit default.
    let mut mapping: PairedRelabelMap<L> = PairedRelabelMap::new();
    for segment in unique_labels(seg) {
        let inner = mapping.get_or_insert_with(segment, RelabelMap::new);
        inner.insert(L::BACKGROUND, L::BACKGROUND);
    }

    let mut next_id = 0u32;
    for (segment, partner) in pairs {
        next_id += 1;
        if let Some(inner) = mapping.get_mut(segment) {
            inner.insert(partner, L::from_id(next_id));
        }
    }

    debug!(
        segments = mapping.len(),
        fresh_labels = next_id,
        "splitting segments by overlap"
    );
    relabel_paired(seg, overlap, &mapping)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::volume::VolumeShape;

    #[test]
    fn counts_require_both_nonzero() {
        let first = Volume::from_vec(VolumeShape::new(1, 2, 2), vec![1u32, 1, 0, 2]).unwrap();
        let second = Volume::from_vec(VolumeShape::new(1, 2, 2), vec![3u32, 0, 3, 4]).unwrap();

        let counts = count_overlaps(&first, &second).unwrap();
        assert_eq!(counts.get(1).unwrap().get(3), Some(&1));
        assert_eq!(counts.get(1).unwrap().get(4), None);
        assert_eq!(counts.get(2).unwrap().get(4), Some(&1));
    }

    #[test]
    fn counts_transpose_under_argument_swap() {
        let first = Volume::from_vec(VolumeShape::new(1, 1, 4), vec![1u32, 1, 2, 2]).unwrap();
        let second = Volume::from_vec(VolumeShape::new(1, 1, 4), vec![7u32, 8, 8, 8]).unwrap();

        let forward = count_overlaps(&first, &second).unwrap();
        let backward = count_overlaps(&second, &first).unwrap();

        for (a, partners) in forward.iter() {
            for (b, &n) in partners.iter() {
                assert_eq!(backward.get(b).unwrap().get(a), Some(&n));
            }
        }
    }

    #[test]
    fn counts_shape_mismatch_errors() {
        let first = Volume::filled(VolumeShape::new(1, 1, 2), 1u32);
        let second = Volume::filled(VolumeShape::new(1, 2, 1), 1u32);
        assert!(matches!(
            count_overlaps(&first, &second),
            Err(VolumeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn split_partitions_segment_by_partner() {
        let mut seg =
            Volume::from_vec(VolumeShape::new(1, 2, 3), vec![5u32, 5, 5, 5, 5, 5]).unwrap();
        let over =
            Volume::from_vec(VolumeShape::new(1, 2, 3), vec![1u32, 1, 2, 2, 0, 0]).unwrap();

        split_by_overlap(&mut seg, &over).unwrap();

        // Pair (5,1) -> 1, pair (5,2) -> 2 in ascending key order;
        // no-partner voxels fall to background.
        assert_eq!(seg.data(), &[1, 1, 2, 2, 0, 0]);
    }

    #[test]
    fn split_assigns_ids_across_segments_deterministically() {
        let mut seg =
            Volume::from_vec(VolumeShape::new(1, 1, 4), vec![4u32, 4, 9, 9]).unwrap();
        let over =
            Volume::from_vec(VolumeShape::new(1, 1, 4), vec![1u32, 2, 1, 2]).unwrap();

        split_by_overlap(&mut seg, &over).unwrap();

        // Pairs in ascending key order: (4,1)->1, (4,2)->2, (9,1)->3, (9,2)->4.
        assert_eq!(seg.data(), &[1, 2, 3, 4]);
    }

    #[test]
    fn split_leaves_background_untouched() {
        let mut seg = Volume::from_vec(VolumeShape::new(1, 1, 3), vec![0u32, 3, 0]).unwrap();
        let over = Volume::from_vec(VolumeShape::new(1, 1, 3), vec![1u32, 1, 1]).unwrap();

        split_by_overlap(&mut seg, &over).unwrap();
        assert_eq!(seg.data(), &[0, 1, 0]);
    }

    #[test]
    fn split_erases_segment_with_no_partner() {
        let mut seg = Volume::from_vec(VolumeShape::new(1, 1, 3), vec![3u32, 3, 3]).unwrap();
        let over = Volume::filled(VolumeShape::new(1, 1, 3), 0u32);

        split_by_overlap(&mut seg, &over).unwrap();
        assert_eq!(seg.data(), &[0, 0, 0]);
    }

    #[test]
    fn split_works_for_float_labels() {
        let mut seg =
            Volume::from_vec(VolumeShape::new(1, 1, 3), vec![2.5f32, 2.5, 2.5]).unwrap();
        let over =
            Volume::from_vec(VolumeShape::new(1, 1, 3), vec![1.0f32, 1.0, 0.0]).unwrap();

        split_by_overlap(&mut seg, &over).unwrap();
        assert_eq!(seg.data(), &[1.0, 1.0, 0.0]);
    }
}
