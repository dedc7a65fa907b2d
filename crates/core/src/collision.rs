//! Collision module - the placement legality gate
//!
//! Every move, rotation and drop asks [`is_legal`] before anything changes.

use crate::grid::Grid;
use crate::pieces::Shape;

/// Check whether `shape` can sit with its top-left cell at `(row, col)`.
///
/// A placement is illegal when an occupied cell lands left of column 0, at or
/// right of the grid width, at or below the bottom visible row boundary, or on
/// an occupied grid cell. Rows above the grid are not checked: pieces may hang
/// above the field while they spawn.
pub fn is_legal(shape: &Shape, row: i8, col: i8, grid: &Grid) -> bool {
    let width = grid.width() as i16;
    let height = grid.height() as i16;

    shape.minos().iter().all(|&(dr, dc)| {
        let r = row as i16 + dr as i16;
        let c = col as i16 + dc as i16;

        if c < 0 || c >= width || r >= height {
            return false;
        }
        !grid.is_occupied(r as i8, c as i8)
    })
}
