//! Grid geometry: where each poster cell sits before the wall transform.
//!
//! The planner is a pure function of `rows`, `cols` and `gap`. The grid is
//! centered on the local origin so the wall transform pivots on its visual
//! center, not a corner.

use crate::model::{CELL_HEIGHT, CELL_WIDTH};

/// One slot of the wall grid, in local (pre-transform) coordinates.
///
/// The box size is the fixed `CELL_WIDTH` x `CELL_HEIGHT` design constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    /// Top-left corner in local space.
    pub x: f64,
    pub y: f64,
}

/// Total extent of the grid content, gaps included.
pub fn grid_size(rows: u32, cols: u32, gap: f64) -> (f64, f64) {
    let total_width = f64::from(cols) * CELL_WIDTH + f64::from(cols - 1) * gap;
    let total_height = f64::from(rows) * CELL_HEIGHT + f64::from(rows - 1) * gap;
    (total_width, total_height)
}

/// Plan the cell positions of a `rows x cols` grid, row-major
/// (left-to-right, then top-to-bottom), centered on the local origin.
///
/// Callers validate `rows >= 1` and `cols >= 1` up front
/// ([`crate::WallSettings::validate`]); this function assumes it.
pub fn plan_grid(rows: u32, cols: u32, gap: f64) -> Vec<GridCell> {
    let (total_width, total_height) = grid_size(rows, cols, gap);
    let start_x = -total_width / 2.0;
    let start_y = -total_height / 2.0;

    let mut cells = Vec::with_capacity(rows as usize * cols as usize);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(GridCell {
                row,
                col,
                x: start_x + f64::from(col) * (CELL_WIDTH + gap),
                y: start_y + f64::from(row) * (CELL_HEIGHT + gap),
            });
        }
    }
    cells
}
