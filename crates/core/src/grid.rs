//! Grid module - the playfield
//!
//! The grid is 10 columns by 20 visible rows, with 2 hidden buffer rows above
//! the field where new pieces spawn. Storage is a flat row-major array, so the
//! grid is `Copy`-sized and never allocates.
//!
//! Coordinates are `(row, col)`. Visible rows are `0..20` (top to bottom), the
//! buffer rows are `-2` and `-1`, columns are `0..10` (left to right).

use crate::types::{Cell, PieceKind, BUFFER_ROWS, GRID_WIDTH, VISIBLE_HEIGHT};

/// Buffer rows plus visible rows
const TOTAL_ROWS: usize = (BUFFER_ROWS + VISIBLE_HEIGHT) as usize;

/// Total number of cells stored
const GRID_SIZE: usize = GRID_WIDTH as usize * TOTAL_ROWS;

/// The playfield, including the hidden spawn buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Row-major cells; storage row 0 is the top buffer row
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Build a grid from rows of text, aligned to the bottom of the visible field.
    ///
    /// Each row must be exactly 10 characters: `.` for empty, or a piece letter.
    /// Panics on malformed input, since this only ever runs on hand-written fixtures.
    ///
    /// ```
    /// use blockfall_core::Grid;
    /// use blockfall_types::PieceKind;
    ///
    /// let grid = Grid::from_ascii(&["IIIIIIIII."]);
    /// assert_eq!(grid.get(19, 0), Some(Some(PieceKind::I)));
    /// assert_eq!(grid.get(19, 9), Some(None));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        assert!(
            rows.len() <= VISIBLE_HEIGHT as usize,
            "at most {} rows fit in the visible field",
            VISIBLE_HEIGHT
        );

        let mut grid = Self::new();
        let first_row = VISIBLE_HEIGHT as usize - rows.len();
        for (i, line) in rows.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                GRID_WIDTH as usize,
                "row {:?} must be {} cells wide",
                line,
                GRID_WIDTH
            );
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string())
                            .unwrap_or_else(|| panic!("unknown cell {:?}", other)),
                    ),
                };
                grid.set((first_row + i) as i8, col as i8, cell);
            }
        }
        grid
    }

    /// Flat index for `(row, col)`, or `None` outside the stored rows/columns
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        let storage_row = row as i16 + BUFFER_ROWS as i16;
        if col < 0
            || col >= GRID_WIDTH as i8
            || storage_row < 0
            || storage_row >= TOTAL_ROWS as i16
        {
            return None;
        }
        Some(storage_row as usize * GRID_WIDTH as usize + col as usize)
    }

    /// Storage range of one row, which must be in range
    #[inline(always)]
    fn row_range(row: i8) -> std::ops::Range<usize> {
        let start = (row as i16 + BUFFER_ROWS as i16) as usize * GRID_WIDTH as usize;
        start..start + GRID_WIDTH as usize
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    /// Visible height; the bottom boundary for collision
    pub fn height(&self) -> u8 {
        VISIBLE_HEIGHT
    }

    pub fn buffer_rows(&self) -> u8 {
        BUFFER_ROWS
    }

    /// Index of the top buffer row (negative)
    pub fn top_row(&self) -> i8 {
        -(BUFFER_ROWS as i8)
    }

    /// Get cell at `(row, col)`; `None` if outside the stored grid
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`; returns false if outside the stored grid
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True only for a stored cell holding a piece tag
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: i8) -> bool {
        if Self::index(row, 0).is_none() {
            return false;
        }
        self.cells[Self::row_range(row)].iter().all(|cell| cell.is_some())
    }

    /// Remove `row`: every row above it moves down by one, up to the top of the
    /// buffer, and the top buffer row becomes empty.
    pub fn collapse_row(&mut self, row: i8) {
        if Self::index(row, 0).is_none() {
            return;
        }

        let top = self.top_row();
        let mut r = row;
        while r > top {
            let src = Self::row_range(r - 1);
            let dst = Self::row_range(r).start;
            self.cells.copy_within(src, dst);
            r -= 1;
        }

        self.cells[Self::row_range(top)].fill(None);
    }

    /// Clear every complete visible row and return how many were removed.
    ///
    /// Sweeps from the bottom visible row upward. A complete row is collapsed
    /// and the same index is examined again; the sweep only moves up once the
    /// row at the current index is incomplete.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut row = VISIBLE_HEIGHT as i8 - 1;

        while row >= 0 {
            if self.is_row_full(row) {
                cleared += 1;
                self.collapse_row(row);
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Number of non-empty cells, buffer rows included
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Cells of one stored row, left to right
    pub fn row(&self, row: i8) -> Option<&[Cell]> {
        Self::index(row, 0).map(|_| &self.cells[Self::row_range(row)])
    }

    /// Copy the visible rows into a fixed-size matrix (no allocation)
    pub fn write_visible(&self, out: &mut [[Cell; GRID_WIDTH as usize]; VISIBLE_HEIGHT as usize]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            out_row.copy_from_slice(&self.cells[Self::row_range(row as i8)]);
        }
    }

    /// All stored cells, top buffer row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
