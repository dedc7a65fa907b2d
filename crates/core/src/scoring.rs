//! Scoring module - score, line and level progression
//!
//! Two point tables exist:
//! - Standard: 1/3/5/8 points for 1-4 rows, with levels every few lines.
//! - Legacy: 100/300/500/800 points, with the level fixed at 1.
//!
//! A lock that clears nothing awards nothing and never resets the score.

use crate::types::{
    ScoringRules, FALL_INTERVAL_FLOOR_MS, INITIAL_LINES_TO_NEXT_LEVEL, LEVEL_STEP_LINES,
};

/// What one clear event added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreDelta {
    pub points: u32,
    pub lines: u32,
    /// Number of levels gained (usually 0 or 1)
    pub level_ups: u32,
}

/// Points for clearing `count` rows in one lock; 0 outside 1..=4
pub fn line_points(rules: ScoringRules, count: u32) -> u32 {
    rules
        .line_points()
        .get(count as usize)
        .copied()
        .unwrap_or(0)
}

/// Gravity interval for `level`: 10% faster per level above 1, never below
/// the floor (or below `base`, if `base` is already under the floor).
pub fn fall_interval_ms(base_ms: u32, level: u32) -> u32 {
    let floor = FALL_INTERVAL_FLOOR_MS.min(base_ms);
    let mut interval = base_ms;
    for _ in 1..level {
        interval = interval * 9 / 10;
        if interval <= floor {
            return floor;
        }
    }
    interval
}

/// Running score/lines/level totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    rules: ScoringRules,
    score: u32,
    lines: u32,
    level: u32,
    lines_to_next_level: u32,
}

impl Progression {
    pub fn new(rules: ScoringRules) -> Self {
        Self {
            rules,
            score: 0,
            lines: 0,
            level: 1,
            lines_to_next_level: INITIAL_LINES_TO_NEXT_LEVEL,
        }
    }

    /// Apply one lock's worth of cleared rows
    pub fn on_lines_cleared(&mut self, count: u32) -> ScoreDelta {
        let points = line_points(self.rules, count);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(count);

        let mut level_ups = 0;
        if self.rules == ScoringRules::Standard {
            while self.lines >= self.lines_to_next_level {
                self.level += 1;
                self.lines_to_next_level = self
                    .lines_to_next_level
                    .saturating_add(LEVEL_STEP_LINES * self.level);
                level_ups += 1;
            }
        }

        ScoreDelta {
            points,
            lines: count,
            level_ups,
        }
    }

    pub fn rules(&self) -> ScoringRules {
        self.rules
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_to_next_level(&self) -> u32 {
        self.lines_to_next_level
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(ScoringRules::Standard)
    }
}
