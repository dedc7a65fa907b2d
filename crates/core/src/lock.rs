//! Lock module - commits a piece into the grid and clears complete rows
//!
//! Locking validates every target cell before writing any of them, so a lock
//! either commits the whole piece or leaves the grid untouched.

use crate::grid::Grid;
use crate::pieces::ActivePiece;

/// Result of locking one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// Part of the piece was still above the visible field; the grid is unchanged
    GameOver,
    /// The piece was written and `cleared_rows` complete rows were removed
    Locked { cleared_rows: u32 },
}

/// Write `piece` into `grid`, then clear complete rows.
///
/// Any occupied cell above visible row 0 ends the game. So does a cell that is
/// already filled, which can only happen when a blocked spawn was let through.
pub fn lock(piece: &ActivePiece, grid: &mut Grid) -> LockOutcome {
    let cells = piece.cells();

    let blocked = cells
        .iter()
        .any(|&(row, col)| row < 0 || !matches!(grid.get(row, col), Some(None)));
    if blocked {
        return LockOutcome::GameOver;
    }

    for &(row, col) in &cells {
        grid.set(row, col, Some(piece.kind));
    }

    LockOutcome::Locked {
        cleared_rows: grid.clear_full_rows(),
    }
}
