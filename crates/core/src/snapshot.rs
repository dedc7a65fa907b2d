use arrayvec::ArrayVec;

use crate::pieces::ActivePiece;
use crate::session::SessionState;
use crate::types::{Cell, Phase, PieceKind, GRID_WIDTH, VISIBLE_HEIGHT};

/// Plain-data copy of everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Visible rows only; the spawn buffer is never drawn
    pub cells: [[Cell; GRID_WIDTH as usize]; VISIBLE_HEIGHT as usize],
    pub active: ActivePiece,
    pub upcoming: PieceKind,
    pub state: SessionState,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[None; GRID_WIDTH as usize]; VISIBLE_HEIGHT as usize];
        self.active = ActivePiece::spawn(PieceKind::I, GRID_WIDTH);
        self.upcoming = PieceKind::I;
        self.state = SessionState {
            score: 0,
            lines: 0,
            level: 1,
            lines_to_next_level: 0,
            phase: Phase::Running,
        };
        self.fall_interval_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.state.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.state.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    /// Locked cell at a visible position; `None` when empty or out of range
    pub fn cell(&self, row: i8, col: i8) -> Cell {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .flatten()
    }

    /// Active piece cells that fall inside the visible field
    pub fn visible_active_cells(&self) -> ArrayVec<(i8, i8), 16> {
        self.active
            .cells()
            .into_iter()
            .filter(|&(row, col)| {
                row >= 0 && row < VISIBLE_HEIGHT as i8 && col >= 0 && col < GRID_WIDTH as i8
            })
            .collect()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cells: [[None; GRID_WIDTH as usize]; VISIBLE_HEIGHT as usize],
            active: ActivePiece::spawn(PieceKind::I, GRID_WIDTH),
            upcoming: PieceKind::I,
            state: SessionState {
                score: 0,
                lines: 0,
                level: 1,
                lines_to_next_level: 0,
                phase: Phase::Running,
            },
            fall_interval_ms: 0,
        };
        s.clear();
        s
    }
}
