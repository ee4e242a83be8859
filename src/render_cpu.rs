//! The composition engine: one synchronous CPU pass from settings + resolved
//! images to a finished frame.
//!
//! The pass is stateless and re-entrant; identical inputs produce identical
//! bytes. All placement flows through two explicit affines: the shared wall
//! transform and the per-cell fitting transform, composed per draw. Clip
//! state is a strict push/pop pair around each cell so cells never
//! accumulate clip regions.

use std::sync::Arc;

use kurbo::Shape as _;

use crate::{
    assets::ResolvedImage,
    composite,
    error::{WallError, WallResult},
    fit::cell_image_transform,
    layout::plan_grid,
    model::{CELL_CORNER_RADIUS, CELL_HEIGHT, CELL_WIDTH, Theme, WallSettings},
    render::FrameRGBA,
    transform::wall_transform,
};

/// Render a wall into a fresh `settings.width x settings.height` surface.
///
/// Step order is fixed: background fill, early exit on zero images, the
/// shared transform, the per-cell fitting loop, transform teardown, overlay
/// wash. Inputs are validated up front; after validation the pass is not
/// expected to fail.
#[tracing::instrument(skip(settings, images), fields(
    width = settings.width,
    height = settings.height,
    rows = settings.rows,
    cols = settings.cols,
    image_count = images.len(),
))]
pub fn render_wall(
    settings: &WallSettings,
    theme: Theme,
    images: &[ResolvedImage],
) -> WallResult<FrameRGBA> {
    settings.validate()?;

    let width_u16: u16 = settings
        .width
        .try_into()
        .map_err(|_| WallError::validation("surface width exceeds u16"))?;
    let height_u16: u16 = settings
        .height
        .try_into()
        .map_err(|_| WallError::validation("surface height exceeds u16"))?;

    let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
    let [bg_r, bg_g, bg_b, bg_a] = theme.background();
    clear_pixmap(&mut pixmap, composite::premul_rgba8(bg_r, bg_g, bg_b, bg_a));

    if images.is_empty() {
        return Ok(frame_from_pixmap(settings, &pixmap));
    }

    let paints = prepare_image_paints(images);

    let wall = wall_transform(settings);
    let cells = plan_grid(settings.rows, settings.cols, settings.gap);

    let [hl_r, hl_g, hl_b, hl_a] = theme.hairline();
    let hairline = vello_cpu::peniko::Color::from_rgba8(hl_r, hl_g, hl_b, hl_a);

    let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg_r, bg_g, bg_b, bg_a));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(settings.width),
        f64::from(settings.height),
    ));

    for cell in &cells {
        let index = (u64::from(cell.row) * u64::from(settings.cols) + u64::from(cell.col))
            as usize
            % images.len();
        let Some(paint) = &paints[index] else {
            // Unresolvable image: the cell stays an implicit gap.
            continue;
        };
        let image = &images[index];

        let rounded = kurbo::RoundedRect::new(
            cell.x,
            cell.y,
            cell.x + CELL_WIDTH,
            cell.y + CELL_HEIGHT,
            CELL_CORNER_RADIUS,
        );
        let cell_path = bezpath_to_cpu(&rounded.to_path(0.1));

        // Clip under the wall transform, so the rounding transforms with
        // the grid.
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(wall));
        ctx.push_clip_layer(&cell_path);

        let local = cell_image_transform(settings.fill_mode, image.width, image.height, cell);
        ctx.set_transform(affine_to_cpu(wall * local));
        ctx.set_paint(paint.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));

        ctx.set_transform(affine_to_cpu(wall));
        ctx.set_paint(hairline);
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(1.0));
        ctx.stroke_path(&cell_path);

        ctx.pop_layer();
    }
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    // Overlay wash happens in device space, outside the wall transform.
    if settings.overlay_opacity > 0.0 {
        composite::wash_in_place(
            pixmap.data_as_u8_slice_mut(),
            theme.overlay(),
            settings.overlay_opacity,
        )?;
    }

    Ok(frame_from_pixmap(settings, &pixmap))
}

/// Convert each resolved image into a CPU image paint once, up front.
///
/// A conversion failure downgrades to a skipped cell, mirroring the decode
/// omission policy.
fn prepare_image_paints(images: &[ResolvedImage]) -> Vec<Option<vello_cpu::Image>> {
    images
        .iter()
        .map(|img| {
            match image_premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)
            {
                Ok(pixmap) => Some(vello_cpu::Image {
                    image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                    sampler: vello_cpu::peniko::ImageSampler::default(),
                }),
                Err(e) => {
                    tracing::warn!(id = %img.id, error = %e, "skipping unpaintable image");
                    None
                }
            }
        })
        .collect()
}

fn frame_from_pixmap(settings: &WallSettings, pixmap: &vello_cpu::Pixmap) -> FrameRGBA {
    FrameRGBA {
        width: settings.width,
        height: settings.height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> WallResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| WallError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| WallError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(WallError::render("resolved image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
