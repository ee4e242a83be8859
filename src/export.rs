//! PNG export of a rendered wall.

use std::path::{Path, PathBuf};

use rand::Rng;
use rand::RngExt;

use crate::{
    error::{WallError, WallResult},
    render::FrameRGBA,
};

/// Generate an export stem: `POSTER_` plus five uniform A-Z characters.
pub fn poster_filename<R: Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut name = String::from("POSTER_");
    for _ in 0..5 {
        name.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
    }
    name
}

/// Encode `frame` as a PNG at `path`.
///
/// The encode goes to a temporary sibling first and is renamed into place,
/// so a failed export leaves no partial file behind.
pub fn export_png(frame: &FrameRGBA, path: &Path) -> WallResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| WallError::export(format!("create output dir '{}': {e}", parent.display())))?;
    }

    let tmp = path.with_extension("png.tmp");
    let mut guard = TempFileGuard(Some(tmp.clone()));

    image::save_buffer_with_format(
        &tmp,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| WallError::export(format!("write png '{}': {e}", path.display())))?;

    std::fs::rename(&tmp, path)
        .map_err(|e| WallError::export(format!("finalize png '{}': {e}", path.display())))?;
    guard.0 = None;
    Ok(())
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}
