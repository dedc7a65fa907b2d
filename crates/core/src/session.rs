//! Session module - the game state machine
//!
//! [`GameSession`] owns the grid, the active piece, the sequencer and the
//! progression totals. The host drives it with two calls: [`GameSession::tick`]
//! on a timer, and [`GameSession::handle_command`] on input.

use log::{debug, info};

use crate::collision::is_legal;
use crate::grid::Grid;
use crate::lock::{lock, LockOutcome};
use crate::pieces::ActivePiece;
use crate::rng::Sequencer;
use crate::scoring::{fall_interval_ms, Progression};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, Phase, PieceKind, ScoringRules, SpawnCheck, DEFAULT_FALL_INTERVAL_MS};

/// Rules a session is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Gravity interval at level 1; must be non-zero
    pub fall_interval_ms: u32,
    pub scoring: ScoringRules,
    pub spawn_check: SpawnCheck,
    /// Shorten the fall interval as the level rises
    pub level_speedup: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            scoring: ScoringRules::Standard,
            spawn_check: SpawnCheck::Deferred,
            level_speedup: true,
        }
    }
}

/// Score, lines, level and phase at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionState {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub lines_to_next_level: u32,
    pub phase: Phase,
}

/// What the most recent successful lock did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub cleared_rows: u32,
    pub points: u32,
    pub level_ups: u32,
}

/// A single game, from first spawn to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    grid: Grid,
    active: ActivePiece,
    sequencer: Sequencer,
    progression: Progression,
    phase: Phase,
    /// Time accumulated toward the next fall step
    fall_elapsed_ms: u32,
    /// Pieces spawned so far, the first one included
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Create a running game with default rules
    pub fn new(seed: u32) -> Self {
        Self::with_config(SessionConfig::default(), seed)
    }

    /// Create a running game with the given rules
    pub fn with_config(config: SessionConfig, seed: u32) -> Self {
        Self::from_grid(config, Grid::new(), seed)
    }

    /// Start a game on a prepared grid (puzzles, fixtures).
    ///
    /// Panics if `config.fall_interval_ms` is zero.
    pub fn from_grid(config: SessionConfig, grid: Grid, seed: u32) -> Self {
        assert!(config.fall_interval_ms > 0, "fall interval must be non-zero");

        let mut sequencer = Sequencer::new(seed);
        let active = ActivePiece::spawn(sequencer.next(), grid.width());

        let mut session = Self {
            config,
            grid,
            active,
            sequencer,
            progression: Progression::new(config.scoring),
            phase: Phase::Running,
            fall_elapsed_ms: 0,
            pieces_spawned: 1,
            last_event: None,
        };
        session.check_spawn();
        session
    }

    /// Start over with the same rules, continuing the piece stream
    pub fn restart(&mut self) {
        let seed = self.sequencer.seed();
        *self = Self::from_grid(self.config, Grid::new(), seed);
        info!("session restarted");
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active_piece(&self) -> ActivePiece {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn session_state(&self) -> SessionState {
        SessionState {
            score: self.progression.score(),
            lines: self.progression.lines(),
            level: self.progression.level(),
            lines_to_next_level: self.progression.lines_to_next_level(),
            phase: self.phase,
        }
    }

    /// The kind that will spawn after the active piece locks
    pub fn upcoming_piece_kind(&self) -> PieceKind {
        self.sequencer.peek()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Current RNG state of the piece stream
    pub fn seed(&self) -> u32 {
        self.sequencer.seed()
    }

    /// Gravity interval at the current level
    pub fn fall_interval_ms(&self) -> u32 {
        if self.config.level_speedup {
            fall_interval_ms(self.config.fall_interval_ms, self.progression.level())
        } else {
            self.config.fall_interval_ms
        }
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_visible(&mut out.cells);
        out.active = self.active;
        out.upcoming = self.upcoming_piece_kind();
        out.state = self.session_state();
        out.fall_interval_ms = self.fall_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance time by `elapsed_ms`. Once a full fall interval has accumulated,
    /// run one fall step and restart the accumulator. Returns true if a fall
    /// step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.fall_elapsed_ms = self.fall_elapsed_ms.saturating_add(elapsed_ms);
        if self.fall_elapsed_ms < self.fall_interval_ms() {
            return false;
        }

        self.fall_elapsed_ms = 0;
        self.fall_step();
        true
    }

    /// Run one fall step now, regardless of accumulated time
    pub fn advance(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.fall_elapsed_ms = 0;
        self.fall_step();
        true
    }

    /// Apply a command. Returns true if the session changed.
    ///
    /// Blocked moves are ignored. Only `TogglePause` and `EndGame` act while
    /// paused; nothing acts after game over.
    pub fn handle_command(&mut self, cmd: Command) -> bool {
        match (self.phase, cmd) {
            (Phase::GameOver, _) => false,
            (_, Command::EndGame) => {
                self.finish("ended by player");
                true
            }
            (Phase::Running, Command::TogglePause) => {
                self.phase = Phase::Paused;
                debug!("paused");
                true
            }
            (Phase::Paused, Command::TogglePause) => {
                self.phase = Phase::Running;
                self.fall_elapsed_ms = 0;
                debug!("resumed");
                true
            }
            (Phase::Paused, _) => false,
            (Phase::Running, Command::MoveLeft) => self.try_shift(0, -1),
            (Phase::Running, Command::MoveRight) => self.try_shift(0, 1),
            (Phase::Running, Command::SoftDrop) => self.try_shift(1, 0),
            (Phase::Running, Command::RotateCw) => self.try_rotate(),
            (Phase::Running, Command::HardDrop) => {
                self.hard_drop();
                true
            }
        }
    }

    fn try_shift(&mut self, drow: i8, dcol: i8) -> bool {
        let moved = self.active.shifted(drow, dcol);
        if !is_legal(&moved.shape, moved.row, moved.col, &self.grid) {
            return false;
        }
        self.active = moved;
        true
    }

    fn try_rotate(&mut self) -> bool {
        let rotated = self.active.rotated();
        if !is_legal(&rotated.shape, rotated.row, rotated.col, &self.grid) {
            return false;
        }
        self.active = rotated;
        true
    }

    fn fall_step(&mut self) {
        if !self.try_shift(1, 0) {
            self.lock_active();
        }
    }

    fn hard_drop(&mut self) {
        let mut rows = 0;
        while self.try_shift(1, 0) {
            rows += 1;
        }
        debug!("hard drop {:?} fell {} rows", self.active.kind, rows);
        self.lock_active();
    }

    fn lock_active(&mut self) {
        match lock(&self.active, &mut self.grid) {
            LockOutcome::GameOver => self.finish("piece locked outside the visible field"),
            LockOutcome::Locked { cleared_rows } => {
                let delta = self.progression.on_lines_cleared(cleared_rows);
                if cleared_rows > 0 {
                    debug!(
                        "cleared {} rows for {} points (score {})",
                        cleared_rows,
                        delta.points,
                        self.progression.score()
                    );
                }
                if delta.level_ups > 0 {
                    info!("level up: now level {}", self.progression.level());
                }

                self.last_event = Some(LockEvent {
                    kind: self.active.kind,
                    cleared_rows,
                    points: delta.points,
                    level_ups: delta.level_ups,
                });
                self.spawn_next();
            }
        }
    }

    fn spawn_next(&mut self) {
        let kind = self.sequencer.next();
        self.active = ActivePiece::spawn(kind, self.grid.width());
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.fall_elapsed_ms = 0;
        self.check_spawn();
    }

    /// A blocked spawn either ends the game now or is left for the next
    /// fall/lock to catch, depending on the configured spawn check.
    fn check_spawn(&mut self) {
        if self.active.fits(&self.grid) {
            return;
        }
        match self.config.spawn_check {
            SpawnCheck::Immediate => self.finish("spawn position blocked"),
            SpawnCheck::Deferred => debug!("spawn of {:?} is blocked", self.active.kind),
        }
    }

    fn finish(&mut self, reason: &str) {
        self.phase = Phase::GameOver;
        let state = self.session_state();
        info!(
            "game over ({}): score {}, lines {}, level {}",
            reason, state.score, state.lines, state.level
        );
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
