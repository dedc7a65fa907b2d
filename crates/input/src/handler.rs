//! Delayed auto shift / auto repeat for held keys.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{repeat_key, RepeatKey};
use crate::types::{Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS};

// Without release events, a tap would otherwise look like a key held forever.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Repeat timing for one held key
#[derive(Debug, Clone, Copy, Default)]
struct Repeater {
    held_ms: u32,
    accumulator: u32,
}

impl Repeater {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `elapsed_ms` and return how many repeats fired. Time up to
    /// `delay` only arms the repeat; every full `rate` after that fires once.
    fn advance(&mut self, elapsed_ms: u32, delay: u32, rate: u32) -> u32 {
        let prev = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < delay {
            return 0;
        }

        self.accumulator += if prev < delay {
            self.held_ms - delay
        } else {
            elapsed_ms
        };

        let rate = rate.max(1);
        let fired = self.accumulator / rate;
        self.accumulator %= rate;
        fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
}

/// Tracks held keys and turns them into repeated commands.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Option<Horizontal>,
    down_held: bool,
    last_key_time: Instant,
    horizontal_repeat: Repeater,
    down_repeat: Repeater,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_repeat: Repeater::default(),
            down_repeat: Repeater::default(),
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Record a press. Returns the command for the first press of a repeating
    /// key; terminal auto-repeat of a key already held returns `None`.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        let key = repeat_key(code)?;
        self.last_key_time = Instant::now();

        match key {
            RepeatKey::Left | RepeatKey::Right => {
                let dir = if key == RepeatKey::Left {
                    Horizontal::Left
                } else {
                    Horizontal::Right
                };
                if self.horizontal == Some(dir) {
                    return None;
                }
                self.horizontal = Some(dir);
                self.horizontal_repeat.reset();
            }
            RepeatKey::Down => {
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat.reset();
            }
        }
        Some(key.command())
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match repeat_key(code) {
            Some(RepeatKey::Left) if self.horizontal == Some(Horizontal::Left) => {
                self.release_horizontal()
            }
            Some(RepeatKey::Right) if self.horizontal == Some(Horizontal::Right) => {
                self.release_horizontal()
            }
            Some(RepeatKey::Down) => self.release_down(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = None;
        self.horizontal_repeat.reset();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat.reset();
    }

    /// Advance held-key timers and collect the repeats that fired.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Command, 32> {
        let mut commands = ArrayVec::<Command, 32>::new();

        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        if self.last_key_time.elapsed() > timeout {
            self.release_horizontal();
            self.release_down();
        }

        if let Some(dir) = self.horizontal {
            let cmd = match dir {
                Horizontal::Left => Command::MoveLeft,
                Horizontal::Right => Command::MoveRight,
            };
            let fired = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..fired {
                let _ = commands.try_push(cmd);
            }
        }

        if self.down_held {
            let fired = self.down_repeat.advance(elapsed_ms, 0, SOFT_DROP_ARR_MS);
            for _ in 0..fired {
                let _ = commands.try_push(Command::SoftDrop);
            }
        }

        commands
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
