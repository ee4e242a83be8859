//! Posterwall composes a grid of images into a single poster-wall raster.
//!
//! The pipeline is explicitly staged:
//!
//! 1. **Resolve**: decode source files into [`ResolvedImage`] records
//!    ([`load_images`], parallel, partial failure tolerated)
//! 2. **Plan**: compute cell geometry from the grid settings ([`plan_grid`])
//! 3. **Render**: one synchronous CPU pass into a [`FrameRGBA`]
//!    ([`render_wall`])
//! 4. **Export**: encode the frame as `POSTER_XXXXX.png` ([`export_png`])
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: planning and rendering are pure; identical inputs
//!   produce identical bytes.
//! - **No IO in the renderer**: external IO is front-loaded in [`assets`].
//! - **Premultiplied RGBA8** end-to-end.
#![forbid(unsafe_code)]

pub mod assets;
pub mod collection;
pub mod composite;
pub mod error;
pub mod export;
pub mod fit;
pub mod layout;
pub mod model;
pub mod render;
pub mod render_cpu;
pub mod transform;

pub use assets::{ResolvedImage, decode_image, load_images};
pub use collection::{CollectionTheme, ThemeService, collection_theme};
pub use error::{WallError, WallResult};
pub use export::{export_png, poster_filename};
pub use fit::cell_image_transform;
pub use layout::{GridCell, grid_size, plan_grid};
pub use model::{
    CELL_CORNER_RADIUS, CELL_HEIGHT, CELL_WIDTH, FillMode, Theme, WallSettings,
};
pub use render::FrameRGBA;
pub use render_cpu::render_wall;
pub use transform::wall_transform;
