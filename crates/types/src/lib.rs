//! Shared types and constants for the falling-block game.
//!
//! Everything here is plain data with no dependencies, so the core, the input
//! mapping and the terminal view can all agree on the same vocabulary.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Visible height**: 20 rows (indexed 0-19)
//! - **Buffer rows**: 2 hidden rows above the field (indexed -2 and -1)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop cadence (~60 FPS) |
//! | `DEFAULT_FALL_INTERVAL_MS` | 500 | Gravity at level 1 |
//! | `FALL_INTERVAL_FLOOR_MS` | 100 | Fastest gravity at high levels |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, GRID_WIDTH, VISIBLE_HEIGHT};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(VISIBLE_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Visible grid height in cells (20 rows)
pub const VISIBLE_HEIGHT: u8 = 20;

/// Hidden spawn rows above visible row 0
pub const BUFFER_ROWS: u8 = 2;

/// Host loop cadence in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const DEFAULT_FALL_INTERVAL_MS: u32 = 500;

/// Gravity never gets faster than this, whatever the level
pub const FALL_INTERVAL_FLOOR_MS: u32 = 100;

/// Lines needed for the first level-up
pub const INITIAL_LINES_TO_NEXT_LEVEL: u32 = 5;

/// Each level-up raises the threshold by `LEVEL_STEP_LINES * new_level`
pub const LEVEL_STEP_LINES: u32 = 5;

/// Held-key delay before auto repeat starts
pub const DEFAULT_DAS_MS: u32 = 150;

/// Interval between auto repeats once started
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop repeats immediately at this rate
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Points for clearing 1..=4 rows in one lock (index = rows cleared)
pub const STANDARD_LINE_POINTS: [u32; 5] = [0, 1, 3, 5, 8];

/// Points table of the older multiplicative rule set
pub const LEGACY_LINE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino kinds
///
/// The cell tag stored in the grid is the kind itself; renderers look up the
/// color from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from a single letter (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(PieceKind::I),
            "J" => Some(PieceKind::J),
            "L" => Some(PieceKind::L),
            "O" => Some(PieceKind::O),
            "S" => Some(PieceKind::S),
            "T" => Some(PieceKind::T),
            "Z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Discrete commands a shell can send to a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the active piece one column left
    MoveLeft,
    /// Move the active piece one column right
    MoveRight,
    /// Rotate the active piece 90° clockwise
    RotateCw,
    /// Move the active piece one row down
    SoftDrop,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Pause a running game, or resume a paused one
    TogglePause,
    /// End the game now
    EndGame,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("togglepause"), Some(Command::TogglePause));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotatecw" => Some(Command::RotateCw),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "togglepause" => Some(Command::TogglePause),
            "endgame" => Some(Command::EndGame),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
            Command::EndGame => "endGame",
        }
    }
}

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Running,
    Paused,
    /// Terminal: nothing mutates the session any more
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Which points table the progression tracker uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringRules {
    /// 1/3/5/8 points with level progression
    #[default]
    Standard,
    /// 100/300/500/800 points, level fixed at 1
    Legacy,
}

impl ScoringRules {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(ScoringRules::Standard),
            "legacy" => Some(ScoringRules::Legacy),
            _ => None,
        }
    }

    pub fn line_points(&self) -> &'static [u32; 5] {
        match self {
            ScoringRules::Standard => &STANDARD_LINE_POINTS,
            ScoringRules::Legacy => &LEGACY_LINE_POINTS,
        }
    }
}

/// When an illegal spawn position ends the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnCheck {
    /// The blocked piece is installed anyway; the next fall or lock ends the game
    #[default]
    Deferred,
    /// The game ends as soon as the new piece cannot be placed
    Immediate,
}

impl SpawnCheck {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deferred" => Some(SpawnCheck::Deferred),
            "immediate" => Some(SpawnCheck::Immediate),
            _ => None,
        }
    }
}

/// A grid cell: empty, or tagged with the kind of the piece that filled it
pub type Cell = Option<PieceKind>;

/// 24-bit RGB color attached to a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_kind_letters_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(
                PieceKind::from_str(&kind.as_str().to_lowercase()),
                Some(kind)
            );
        }
    }

    #[test]
    fn command_names_parse_back() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::RotateCw,
            Command::SoftDrop,
            Command::HardDrop,
            Command::TogglePause,
            Command::EndGame,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn scoring_tables_match_rule_sets() {
        assert_eq!(ScoringRules::Standard.line_points(), &[0, 1, 3, 5, 8]);
        assert_eq!(ScoringRules::Legacy.line_points(), &[0, 100, 300, 500, 800]);
        assert_eq!(ScoringRules::default(), ScoringRules::Standard);
    }

    #[test]
    fn rule_names_parse_with_whitespace() {
        assert_eq!(ScoringRules::from_str(" Legacy "), Some(ScoringRules::Legacy));
        assert_eq!(SpawnCheck::from_str("IMMEDIATE"), Some(SpawnCheck::Immediate));
        assert_eq!(SpawnCheck::from_str("later"), None);
        assert_eq!(SpawnCheck::default(), SpawnCheck::Deferred);
    }
}
