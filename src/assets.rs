//! Source image resolution.
//!
//! External IO stops here: the renderer only ever sees [`ResolvedImage`]
//! records that were fully decoded up front. Loading fans out across files
//! and tolerates partial failure; a file that cannot be read or decoded is
//! logged and omitted, never aborting the batch.

use std::{path::PathBuf, sync::Arc};

use rayon::prelude::*;

mod decode;

pub use decode::decode_image;

/// A decoded source bitmap: stable id, pixel dimensions, premultiplied RGBA8.
///
/// Owned by the caller; the composition engine only reads it.
#[derive(Clone, Debug)]
pub struct ResolvedImage {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Read and decode `paths` in parallel, keeping input order.
///
/// Failed reads/decodes are warned about and dropped from the result.
pub fn load_images(paths: &[PathBuf]) -> Vec<ResolvedImage> {
    let resolved: Vec<ResolvedImage> = paths
        .par_iter()
        .filter_map(|path| {
            let id = path.display().to_string();
            let bytes = match std::fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(path = %id, error = %e, "skipping unreadable image");
                    return None;
                }
            };
            match decode_image(&id, &bytes) {
                Ok(img) => Some(img),
                Err(e) => {
                    tracing::warn!(path = %id, error = %e, "skipping undecodable image");
                    None
                }
            }
        })
        .collect();

    tracing::debug!(
        requested = paths.len(),
        resolved = resolved.len(),
        "image load complete"
    );
    resolved
}
