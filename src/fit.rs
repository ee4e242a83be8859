//! Per-cell image fitting.
//!
//! Each mode is expressed as an affine mapping image pixel space into local
//! grid space. The renderer draws the full image under this mapping inside
//! the cell's clip, so `cover` cropping falls out of the clip rather than a
//! source-rect copy.

use kurbo::Affine;

use crate::{
    layout::GridCell,
    model::{CELL_HEIGHT, CELL_WIDTH, FillMode},
};

/// Affine mapping the `image_width x image_height` pixel grid of a source
/// image into `cell`'s box under `mode`.
///
/// Image dimensions must be non-zero; zero-sized decodes are rejected
/// upstream ([`crate::assets::decode_image`]).
pub fn cell_image_transform(
    mode: FillMode,
    image_width: u32,
    image_height: u32,
    cell: &GridCell,
) -> Affine {
    let iw = f64::from(image_width);
    let ih = f64::from(image_height);
    let aspect = iw / ih;
    let target_aspect = CELL_WIDTH / CELL_HEIGHT;

    match mode {
        FillMode::Stretch => Affine::translate((cell.x, cell.y))
            * Affine::scale_non_uniform(CELL_WIDTH / iw, CELL_HEIGHT / ih),
        FillMode::Contain => {
            let (draw_w, draw_h) = if aspect > target_aspect {
                (CELL_WIDTH, CELL_WIDTH / aspect)
            } else {
                (CELL_HEIGHT * aspect, CELL_HEIGHT)
            };
            let dx = cell.x + (CELL_WIDTH - draw_w) / 2.0;
            let dy = cell.y + (CELL_HEIGHT - draw_h) / 2.0;
            Affine::translate((dx, dy)) * Affine::scale(draw_w / iw)
        }
        FillMode::Cover => {
            // Centered source crop of the cell's aspect; the clip trims the rest.
            let (crop_x, crop_y, crop_w) = if aspect > target_aspect {
                let crop_w = ih * target_aspect;
                ((iw - crop_w) / 2.0, 0.0, crop_w)
            } else {
                let crop_h = iw / target_aspect;
                (0.0, (ih - crop_h) / 2.0, iw)
            };
            Affine::translate((cell.x, cell.y))
                * Affine::scale(CELL_WIDTH / crop_w)
                * Affine::translate((-crop_x, -crop_y))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn origin_cell() -> GridCell {
        GridCell {
            row: 0,
            col: 0,
            x: 0.0,
            y: 0.0,
        }
    }

    fn assert_close(p: Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9, "{p:?} != ({x}, {y})");
    }

    #[test]
    fn stretch_maps_image_corners_to_cell_corners() {
        let t = cell_image_transform(FillMode::Stretch, 200, 100, &origin_cell());
        assert_close(t * Point::new(0.0, 0.0), 0.0, 0.0);
        assert_close(t * Point::new(200.0, 100.0), CELL_WIDTH, CELL_HEIGHT);
    }

    #[test]
    fn contain_letterboxes_wide_images_vertically() {
        // 2:1 image in a 2:3 cell: full width, height 150, centered.
        let t = cell_image_transform(FillMode::Contain, 200, 100, &origin_cell());
        assert_close(t * Point::new(0.0, 0.0), 0.0, 150.0);
        assert_close(t * Point::new(200.0, 100.0), CELL_WIDTH, 300.0);
    }

    #[test]
    fn contain_pillarboxes_tall_images_horizontally() {
        // 1:3 image in a 2:3 cell: full height, width 150, centered.
        let t = cell_image_transform(FillMode::Contain, 100, 300, &origin_cell());
        assert_close(t * Point::new(0.0, 0.0), 75.0, 0.0);
        assert_close(t * Point::new(100.0, 300.0), 225.0, CELL_HEIGHT);
    }

    #[test]
    fn contain_scaling_is_uniform() {
        let t = cell_image_transform(FillMode::Contain, 200, 100, &origin_cell());
        let c = t.as_coeffs();
        assert!((c[0] - c[3]).abs() < 1e-9);
        assert_eq!(c[1], 0.0);
        assert_eq!(c[2], 0.0);
    }

    #[test]
    fn cover_maps_centered_crop_onto_the_cell() {
        // Wide 2:1 image: horizontal crop of width ih * (300/450).
        let t = cell_image_transform(FillMode::Cover, 200, 100, &origin_cell());
        let crop_w = 100.0 * (CELL_WIDTH / CELL_HEIGHT);
        let crop_x = (200.0 - crop_w) / 2.0;
        assert_close(t * Point::new(crop_x, 0.0), 0.0, 0.0);
        assert_close(t * Point::new(crop_x + crop_w, 100.0), CELL_WIDTH, CELL_HEIGHT);
    }

    #[test]
    fn cover_crops_tall_images_vertically() {
        let t = cell_image_transform(FillMode::Cover, 100, 300, &origin_cell());
        let crop_h = 100.0 / (CELL_WIDTH / CELL_HEIGHT);
        let crop_y = (300.0 - crop_h) / 2.0;
        assert_close(t * Point::new(0.0, crop_y), 0.0, 0.0);
        assert_close(t * Point::new(100.0, crop_y + crop_h), CELL_WIDTH, CELL_HEIGHT);
    }

    #[test]
    fn cover_spills_past_the_cell_box() {
        // The uncropped edges land outside the cell; the clip removes them.
        let t = cell_image_transform(FillMode::Cover, 200, 100, &origin_cell());
        let left = t * Point::new(0.0, 0.0);
        let right = t * Point::new(200.0, 100.0);
        assert!(left.x < 0.0);
        assert!(right.x > CELL_WIDTH);
    }

    #[test]
    fn fit_respects_cell_offsets() {
        let cell = GridCell {
            row: 1,
            col: 2,
            x: 40.0,
            y: -60.0,
        };
        let t = cell_image_transform(FillMode::Stretch, 300, 450, &cell);
        assert_close(t * Point::new(0.0, 0.0), 40.0, -60.0);
    }
}
