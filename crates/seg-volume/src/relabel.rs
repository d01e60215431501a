//! In-place relabeling of segmentation volumes.

use tracing::debug;

use crate::describe::segment_sizes;
use crate::error::VolumeError;
use crate::label::{LabelMap, LabelValue, PairedRelabelMap, RelabelMap};
use crate::volume::{Volume, ensure_same_shape};

/// Relabels a volume in place according to a flat mapping.
///
/// Every voxel whose value is a key in `mapping` is overwritten with the
/// mapped value; all other voxels are left unchanged. Background voxels
/// are only rewritten if `0` is itself a key.
///
/// # Example
///
/// ```
/// use seg_volume::{relabel, RelabelMap, Volume, VolumeShape};
///
/// let mut vol = Volume::from_vec(VolumeShape::new(1, 1, 4), vec![1u32, 2, 3, 0]).unwrap();
/// let mapping: RelabelMap<u32> = [(1, 10), (3, 30)].into_iter().collect();
///
/// relabel(&mut vol, &mapping);
/// assert_eq!(vol.data(), &[10, 2, 30, 0]);
/// ```
pub fn relabel<L: LabelValue>(vol: &mut Volume<L>, mapping: &RelabelMap<L>) {
    if mapping.is_empty() {
        return;
    }
    for v in vol.data_mut() {
        if let Some(&to) = mapping.get(*v) {
            *v = to;
        }
    }
}

/// Relabels a primary volume in place keyed by (primary, secondary) pairs.
///
/// For every voxel where `primary` is nonzero, the replacement is looked
/// up as `mapping[primary][secondary]`, reading the secondary label from
/// the same position of `secondary`. Voxels where `primary` is `0` are
/// left untouched, and `secondary` is never mutated.
///
/// Every (primary, secondary) pair occurring among nonzero-primary voxels
/// must be present in `mapping`. All pairs are validated in a read-only
/// pass before any write, so a failed call leaves `primary` untouched.
///
/// # Errors
///
/// - [`VolumeError::ShapeMismatch`] if the volumes differ in shape.
/// - [`VolumeError::MissingPairedEntry`] if a pair has no mapping entry.
pub fn relabel_paired<L: LabelValue>(
    primary: &mut Volume<L>,
    secondary: &Volume<L>,
    mapping: &PairedRelabelMap<L>,
) -> Result<(), VolumeError> {
    ensure_same_shape(primary.shape(), secondary.shape())?;

    for (&p, &s) in primary.data().iter().zip(secondary.data()) {
        if p.is_background() {
            continue;
        }
        let present = mapping.get(p).is_some_and(|inner| inner.contains(s));
        if !present {
            return Err(VolumeError::MissingPairedEntry {
                primary: p.to_string(),
                secondary: s.to_string(),
            });
        }
    }

    for (p, &s) in primary.data_mut().iter_mut().zip(secondary.data()) {
        if p.is_background() {
            continue;
        }
        if let Some(&to) = mapping.get(*p).and_then(|inner| inner.get(s)) {
            *p = to;
        }
    }
    Ok(())
}

/// Erases the listed segments, resetting their voxels to background.
pub fn filter_segments_by_id<L: LabelValue>(seg: &mut Volume<L>, ids: &[L]) {
    let removal: RelabelMap<L> = ids.iter().map(|&id| (id, L::BACKGROUND)).collect();
    relabel(seg, &removal);
}

/// Erases every segment smaller than `min_size` voxels.
///
/// Returns the sizes of the surviving segments.
///
/// # Example
///
/// ```
/// use seg_volume::{filter_segments_by_size, Volume, VolumeShape};
///
/// let mut vol = Volume::from_vec(VolumeShape::new(1, 1, 5), vec![1u32, 1, 1, 2, 0]).unwrap();
///
/// let kept = filter_segments_by_size(&mut vol, 2);
/// assert_eq!(vol.data(), &[1, 1, 1, 0, 0]);
/// assert_eq!(kept.get(1), Some(&3));
/// assert_eq!(kept.get(2), None);
/// ```
pub fn filter_segments_by_size<L: LabelValue>(
    seg: &mut Volume<L>,
    min_size: u64,
) -> LabelMap<L, u64> {
    let sizes = segment_sizes(seg);
    let mut removal: RelabelMap<L> = RelabelMap::new();
    let mut kept: LabelMap<L, u64> = LabelMap::new();

    for (label, &size) in sizes.iter() {
        if size < min_size {
            removal.insert(label, L::BACKGROUND);
        } else {
            kept.insert(label, size);
        }
    }

    if !removal.is_empty() {
        debug!(
            removed = removal.len(),
            kept = kept.len(),
            min_size,
            "filtering segments by size"
        );
        relabel(seg, &removal);
    }
    kept
}
