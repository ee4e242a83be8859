use std::sync::Arc;

use crate::{
    assets::ResolvedImage,
    error::{WallError, WallResult},
};

/// Decode an encoded image (PNG/JPEG/...) into premultiplied RGBA8.
pub fn decode_image(id: impl Into<String>, bytes: &[u8]) -> WallResult<ResolvedImage> {
    let id = id.into();
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| WallError::decode(format!("decode image '{id}': {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(WallError::decode(format!("image '{id}' has a zero dimension")));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(ResolvedImage {
        id,
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decode_image_png_dimensions_and_premul() {
        let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
        let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let resolved = decode_image("one", &buf).unwrap();
        assert_eq!(resolved.width, 1);
        assert_eq!(resolved.height, 1);
        assert_eq!(
            resolved.rgba8_premul.as_slice(),
            &[
                ((100u16 * 128 + 127) / 255) as u8,
                ((50u16 * 128 + 127) / 255) as u8,
                ((200u16 * 128 + 127) / 255) as u8,
                128u8
            ]
        );
    }

    #[test]
    fn decode_image_rejects_garbage() {
        let err = decode_image("bad", b"definitely not an image").unwrap_err();
        assert!(err.to_string().contains("decode error:"));
    }

    #[test]
    fn fully_transparent_pixels_zero_out() {
        let mut rgba = vec![200u8, 100, 50, 0];
        premultiply_rgba8_in_place(&mut rgba);
        assert_eq!(rgba, vec![0, 0, 0, 0]);
    }
}
