//! The shared wall transform.
//!
//! The original canvas code mutated the drawing context transform step by
//! step; here the same composition is a single explicit [`kurbo::Affine`]
//! value, so it can be inspected, tested and handed to the renderer as data.

use kurbo::Affine;

use crate::model::WallSettings;

/// Compose the global wall transform:
/// translate to the pivot, rotate, shear the x-axis by `skew * y`, then
/// scale by `(scale, scale * scale_y)`.
///
/// The pivot is `(width/2 + offset_x, height/2 + offset_y)` in device space.
/// Applied to local grid coordinates, which are centered on the origin
/// ([`crate::layout::plan_grid`]), so the wall rotates and scales about its
/// visual center.
pub fn wall_transform(settings: &WallSettings) -> Affine {
    let pivot_x = f64::from(settings.width) / 2.0 + settings.offset_x;
    let pivot_y = f64::from(settings.height) / 2.0 + settings.offset_y;

    let shear = Affine::new([1.0, 0.0, settings.skew, 1.0, 0.0, 0.0]);

    Affine::translate((pivot_x, pivot_y))
        * Affine::rotate(settings.angle.to_radians())
        * shear
        * Affine::scale_non_uniform(settings.scale, settings.scale * settings.scale_y)
}
