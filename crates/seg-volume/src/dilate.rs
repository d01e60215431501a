//! Distance-threshold dilation of labeled segments.

use tracing::debug;

use crate::distance::manhattan_distance_2d;
use crate::error::VolumeError;
use crate::label::LabelValue;
use crate::volume::Volume;

/// Dilates every segment by up to `k` Manhattan steps within its x-slice,
/// in place.
///
/// Runs [`manhattan_distance_2d`] on the pair (overwriting both volumes),
/// then resets every voxel whose distance is strictly greater than `k` to
/// background. Voxels at distance `k` or less keep the nearest label the
/// transform propagated into them; with `k = 0` that is exactly the
/// originally nonzero voxels, so the segmentation comes back unchanged.
///
/// # Errors
///
/// Returns [`VolumeError::ShapeMismatch`] if the volumes differ in shape;
/// neither volume is mutated in that case.
///
/// # Example
///
/// ```
/// use seg_volume::{dilate_by_k, Volume, VolumeShape};
///
/// let shape = VolumeShape::new(1, 1, 5);
/// let mut seg = Volume::from_vec(shape, vec![0u32, 0, 6, 0, 0]).unwrap();
/// let mut dists = Volume::filled(shape, 0u32);
///
/// dilate_by_k(&mut seg, &mut dists, 1).unwrap();
/// assert_eq!(seg.data(), &[0, 6, 6, 6, 0]);
/// ```
pub fn dilate_by_k<L: LabelValue>(
    seg: &mut Volume<L>,
    dists: &mut Volume<u32>,
    k: u32,
) -> Result<(), VolumeError> {
    debug!(shape = %seg.shape(), k, "dilating segments");
    manhattan_distance_2d(seg, dists)?;

    for (v, &dist) in seg.data_mut().iter_mut().zip(dists.data()) {
        if dist > k {
            *v = L::BACKGROUND;
        }
    }
    Ok(())
}
