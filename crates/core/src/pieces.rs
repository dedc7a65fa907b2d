//! Pieces module - tetromino catalog and rotation
//!
//! Every kind is described by a square shape matrix in its local frame. Rotation
//! is a pure function from one matrix to a new one; the catalog never changes.

use arrayvec::ArrayVec;

use crate::collision::is_legal;
use crate::grid::Grid;
use crate::types::{PieceKind, Rgb};

/// Largest supported matrix side (the I piece)
pub const MAX_SHAPE_SIZE: u8 = 4;

/// Offset of an occupied cell within a shape, as `(row, col)`
pub type MinoOffset = (i8, i8);

/// Square occupancy matrix of side 1..=4.
///
/// Each row is a bitmask with the leftmost column in the highest of the `size`
/// low bits, so `0b011` in a 3-wide shape reads as `.##`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [u8; MAX_SHAPE_SIZE as usize],
}

impl Shape {
    /// Build a shape from row bitmasks. Panics if `size` is out of range or a
    /// row has bits outside the matrix.
    pub const fn new(size: u8, rows: [u8; MAX_SHAPE_SIZE as usize]) -> Self {
        assert!(size >= 1 && size <= MAX_SHAPE_SIZE, "shape size must be 1..=4");
        let mut r = 0;
        while r < MAX_SHAPE_SIZE as usize {
            assert!(
                (r < size as usize || rows[r] == 0) && rows[r] >> size == 0,
                "shape row out of bounds"
            );
            r += 1;
        }
        Self { size, rows }
    }

    /// Parse `#`/`.` rows; the row count must equal every row's width.
    ///
    /// ```
    /// use blockfall_core::{shape_of, Shape};
    /// use blockfall_types::PieceKind;
    ///
    /// let t = Shape::parse(&[".#.", "###", "..."]);
    /// assert_eq!(t, shape_of(PieceKind::T));
    /// ```
    pub fn parse(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(
            (1..=MAX_SHAPE_SIZE as usize).contains(&size),
            "shape size must be 1..=4, got {}",
            size
        );

        let mut bits = [0u8; MAX_SHAPE_SIZE as usize];
        for (r, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), size, "shape must be square");
            for (c, ch) in line.chars().enumerate() {
                if ch == '#' {
                    bits[r] |= 1 << (size - 1 - c);
                }
            }
        }
        Self::new(size as u8, bits)
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the local cell `(row, col)` is occupied; false outside the matrix
    #[inline(always)]
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        (self.rows[row as usize] >> (self.size - 1 - col)) & 1 == 1
    }

    /// Occupied local cells, top to bottom then left to right
    pub fn minos(&self) -> ArrayVec<MinoOffset, 16> {
        let mut out = ArrayVec::new();
        for r in 0..self.size {
            for c in 0..self.size {
                if self.is_filled(r, c) {
                    out.push((r as i8, c as i8));
                }
            }
        }
        out
    }
}

const I_SHAPE: Shape = Shape::new(4, [0b0000, 0b1111, 0b0000, 0b0000]);
const J_SHAPE: Shape = Shape::new(3, [0b100, 0b111, 0b000, 0]);
const L_SHAPE: Shape = Shape::new(3, [0b001, 0b111, 0b000, 0]);
const O_SHAPE: Shape = Shape::new(2, [0b11, 0b11, 0, 0]);
const S_SHAPE: Shape = Shape::new(3, [0b011, 0b110, 0b000, 0]);
const T_SHAPE: Shape = Shape::new(3, [0b010, 0b111, 0b000, 0]);
const Z_SHAPE: Shape = Shape::new(3, [0b110, 0b011, 0b000, 0]);

/// Canonical (0°) matrix for a kind
pub fn shape_of(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Rotate 90° clockwise: for side K, `out[i][j] = in[K-1-j][i]`
pub fn rotate(shape: &Shape) -> Shape {
    let k = shape.size;
    let mut rows = [0u8; MAX_SHAPE_SIZE as usize];
    for i in 0..k {
        for j in 0..k {
            if shape.is_filled(k - 1 - j, i) {
                rows[i as usize] |= 1 << (k - 1 - j);
            }
        }
    }
    Shape::new(k, rows)
}

/// Where a new piece of `kind` appears: centered horizontally, with the I piece
/// one row lower than the others so its filled row sits at row 0.
pub fn spawn_position(kind: PieceKind, grid_width: u8) -> (i8, i8) {
    let size = shape_of(kind).size() as i8;
    let col = grid_width as i8 / 2 - (size + 1) / 2;
    let row = match kind {
        PieceKind::I => -1,
        _ => -2,
    };
    (row, col)
}

/// Display color for a kind
pub fn color_of(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::T => Rgb::new(128, 0, 128),
        PieceKind::S => Rgb::new(0, 128, 0),
        PieceKind::Z => Rgb::new(255, 0, 0),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current matrix (after any rotations)
    pub shape: Shape,
    /// Grid row of the matrix's top-left cell; negative while in the buffer
    pub row: i8,
    /// Grid column of the matrix's top-left cell
    pub col: i8,
}

impl ActivePiece {
    /// A fresh piece of `kind` at its spawn position
    pub fn spawn(kind: PieceKind, grid_width: u8) -> Self {
        let (row, col) = spawn_position(kind, grid_width);
        Self {
            kind,
            shape: shape_of(kind),
            row,
            col,
        }
    }

    /// Same piece moved by `(drow, dcol)`
    pub fn shifted(&self, drow: i8, dcol: i8) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            ..*self
        }
    }

    /// Same piece with its matrix rotated clockwise in place
    pub fn rotated(&self) -> Self {
        Self {
            shape: rotate(&self.shape),
            ..*self
        }
    }

    /// Grid coordinates of every occupied cell
    pub fn cells(&self) -> ArrayVec<(i8, i8), 16> {
        self.shape
            .minos()
            .iter()
            .map(|&(dr, dc)| (self.row + dr, self.col + dc))
            .collect()
    }

    /// Whether the piece sits at a legal position on `grid`
    pub fn fits(&self, grid: &Grid) -> bool {
        is_legal(&self.shape, self.row, self.col, grid)
    }
}
