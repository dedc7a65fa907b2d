//! Grid, collision and line-clear tests

use blockfall::core::{is_legal, lock, shape_of, ActivePiece, Grid, LockOutcome, Shape};
use blockfall::types::{PieceKind, BUFFER_ROWS, GRID_WIDTH, VISIBLE_HEIGHT};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), GRID_WIDTH);
    assert_eq!(grid.height(), VISIBLE_HEIGHT);
    assert_eq!(grid.buffer_rows(), BUFFER_ROWS);

    for row in grid.top_row()..VISIBLE_HEIGHT as i8 {
        for col in 0..GRID_WIDTH as i8 {
            assert_eq!(grid.get(row, col), Some(None), "({}, {})", row, col);
        }
    }
}

#[test]
fn test_grid_out_of_bounds() {
    let mut grid = Grid::new();

    assert_eq!(grid.get(-3, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(VISIBLE_HEIGHT as i8, 0), None);
    assert_eq!(grid.get(0, GRID_WIDTH as i8), None);

    assert!(!grid.set(-3, 0, Some(PieceKind::T)));
    assert!(!grid.set(0, GRID_WIDTH as i8, Some(PieceKind::T)));
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_single_cell_completes_bottom_row() {
    let mut grid = Grid::from_ascii(&["S.........", "IIIIIIIII."]);

    let piece = ActivePiece {
        kind: PieceKind::T,
        shape: Shape::parse(&["#"]),
        row: 19,
        col: 9,
    };

    assert_eq!(lock(&piece, &mut grid), LockOutcome::Locked { cleared_rows: 1 });

    // The former second row is now the bottom row.
    assert_eq!(grid.get(19, 0), Some(Some(PieceKind::S)));
    for col in 1..GRID_WIDTH as i8 {
        assert_eq!(grid.get(19, col), Some(None));
    }
    assert!(grid.row(-2).unwrap().iter().all(|c| c.is_none()));
}

#[test]
fn test_non_adjacent_full_rows_clear_together() {
    let mut grid = Grid::from_ascii(&[
        "ZZZZZZZZZZ",
        "J.........",
        "LLLLLLLLLL",
        "..O.......",
    ]);

    assert_eq!(grid.clear_full_rows(), 2);
    assert_eq!(grid.get(19, 2), Some(Some(PieceKind::O)));
    assert_eq!(grid.get(18, 0), Some(Some(PieceKind::J)));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_clear_accounting_over_random_stacks() {
    // Each row is full except for one hole; filling some holes and locking
    // must remove exactly those rows.
    let holes = [3, 7, 0, 9, 5, 2];
    let rows: Vec<String> = holes
        .iter()
        .map(|&h| {
            (0..GRID_WIDTH as usize)
                .map(|c| if c == h { '.' } else { 'O' })
                .collect()
        })
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let mut grid = Grid::from_ascii(&row_refs);
    let before = grid.occupied_count();

    // Plug the holes of the bottom two rows (rows 18 and 19).
    let mut cleared = 0;
    for (row, hole) in [(18i8, holes[4]), (19i8, holes[5])].iter() {
        let plug = ActivePiece {
            kind: PieceKind::I,
            shape: Shape::parse(&["#"]),
            row: *row,
            col: *hole as i8,
        };
        match lock(&plug, &mut grid) {
            LockOutcome::Locked { cleared_rows } => cleared += cleared_rows,
            LockOutcome::GameOver => panic!("unexpected game over"),
        }
    }

    assert_eq!(cleared, 2);
    assert_eq!(
        grid.occupied_count(),
        before + 2 - cleared as usize * GRID_WIDTH as usize
    );
    for row in 0..VISIBLE_HEIGHT as i8 {
        assert!(!grid.is_row_full(row));
    }
}

/// Reference legality check written directly from the placement rule
fn brute_force_legal(shape: &Shape, row: i8, col: i8, grid: &Grid) -> bool {
    for r in 0..shape.size() {
        for c in 0..shape.size() {
            if !shape.is_filled(r, c) {
                continue;
            }
            let gr = row as i32 + r as i32;
            let gc = col as i32 + c as i32;
            if gc < 0 || gc >= GRID_WIDTH as i32 || gr >= VISIBLE_HEIGHT as i32 {
                return false;
            }
            if gr >= -(BUFFER_ROWS as i32) && grid.is_occupied(gr as i8, gc as i8) {
                return false;
            }
        }
    }
    true
}

#[test]
fn test_collision_matches_brute_force() {
    let grid = Grid::from_ascii(&[
        "....T.....",
        "...TTT....",
        "Z.......LL",
        "ZZ..SS..L.",
        ".Z.SS...L.",
    ]);

    for kind in PieceKind::ALL {
        let mut shape = shape_of(kind);
        for _ in 0..4 {
            for row in -4..22i8 {
                for col in -4..12i8 {
                    assert_eq!(
                        is_legal(&shape, row, col, &grid),
                        brute_force_legal(&shape, row, col, &grid),
                        "{:?} at ({}, {})",
                        kind,
                        row,
                        col
                    );
                }
            }
            shape = blockfall::core::rotate(&shape);
        }
    }
}

#[test]
fn test_write_visible_skips_buffer() {
    let mut grid = Grid::new();
    grid.set(-1, 0, Some(PieceKind::L));
    grid.set(0, 1, Some(PieceKind::J));

    let mut out = [[None; GRID_WIDTH as usize]; VISIBLE_HEIGHT as usize];
    grid.write_visible(&mut out);

    assert_eq!(out[0][0], None);
    assert_eq!(out[0][1], Some(PieceKind::J));
}
