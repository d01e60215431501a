//! Surface voxel extraction.

use crate::label::LabelValue;
use crate::volume::Volume;

/// Extracts the surface voxels of every segment.
///
/// Returns a fresh volume where a voxel keeps its label exactly when it is
/// nonzero and differs from at least one of its six axis neighbors;
/// everything else is background. Volume borders count as interior: a
/// voxel on the boundary of the volume is only a surface voxel if an
/// in-bounds neighbor differs.
#[must_use]
pub fn label_surfaces_3d<L: LabelValue>(seg: &Volume<L>) -> Volume<L> {
    surfaces(seg, true)
}

/// Extracts per-slice surface voxels.
///
/// Like [`label_surfaces_3d`], but only the four in-slice (y/z) neighbors
/// are considered, so faces between x-slices do not count as surface.
#[must_use]
pub fn label_surfaces_2d<L: LabelValue>(seg: &Volume<L>) -> Volume<L> {
    surfaces(seg, false)
}

fn surfaces<L: LabelValue>(seg: &Volume<L>, include_x: bool) -> Volume<L> {
    let shape = seg.shape();
    let (nx, ny, nz) = (shape.x, shape.y, shape.z);
    let slice_len = shape.slice_len();
    let data = seg.data();
    let mut out = Volume::filled(shape, L::BACKGROUND);
    let out_data = out.data_mut();

    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                let i = (x * ny + y) * nz + z;
                let v = data[i];
                if v.is_background() {
                    continue;
                }

                let differs = (include_x
                    && ((x > 0 && data[i - slice_len] != v)
                        || (x + 1 < nx && data[i + slice_len] != v)))
                    || (y > 0 && data[i - nz] != v)
                    || (y + 1 < ny && data[i + nz] != v)
                    || (z > 0 && data[i - 1] != v)
                    || (z + 1 < nz && data[i + 1] != v);

                if differs {
                    out_data[i] = v;
                }
            }
        }
    }
    out
}
