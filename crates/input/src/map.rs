//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that auto-repeat while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKey {
    Left,
    Right,
    Down,
}

impl RepeatKey {
    pub fn command(self) -> Command {
        match self {
            RepeatKey::Left => Command::MoveLeft,
            RepeatKey::Right => Command::MoveRight,
            RepeatKey::Down => Command::SoftDrop,
        }
    }
}

/// Which repeating key `code` is, if any
pub fn repeat_key(code: KeyCode) -> Option<RepeatKey> {
    match code {
        KeyCode::Left | KeyCode::Char('4') => Some(RepeatKey::Left),
        KeyCode::Right | KeyCode::Char('6') => Some(RepeatKey::Right),
        KeyCode::Down | KeyCode::Char('2') => Some(RepeatKey::Down),
        _ => None,
    }
}

/// Map keyboard input to a game command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if let Some(held) = repeat_key(key.code) {
        return Some(held.command());
    }

    match key.code {
        // Rotation
        KeyCode::Up
        | KeyCode::Char('a')
        | KeyCode::Char('A')
        | KeyCode::Char('b')
        | KeyCode::Char('B') => Some(Command::RotateCw),

        // Actions
        KeyCode::Char(' ') | KeyCode::Char('8') => Some(Command::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Esc => Some(Command::EndGame),

        _ => None,
    }
}

/// Check if key should start a new game (only honored after game over).
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(Command::SoftDrop));

        assert_eq!(key(KeyCode::Char('4')), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Char('6')), Some(Command::MoveRight));
        assert_eq!(key(KeyCode::Char('2')), Some(Command::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Up), Some(Command::RotateCw));
        assert_eq!(key(KeyCode::Char('a')), Some(Command::RotateCw));
        assert_eq!(key(KeyCode::Char('b')), Some(Command::RotateCw));
        assert_eq!(key(KeyCode::Char('B')), Some(Command::RotateCw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(key(KeyCode::Char('8')), Some(Command::HardDrop));
        assert_eq!(key(KeyCode::Char('p')), Some(Command::TogglePause));
        assert_eq!(key(KeyCode::Esc), Some(Command::EndGame));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_restart_is_not_a_command() {
        assert_eq!(key(KeyCode::Char('r')), None);
        assert!(is_restart(KeyEvent::from(KeyCode::Char('r'))));
        assert!(!is_restart(KeyEvent::from(KeyCode::Char('p'))));
    }

    #[test]
    fn test_repeat_keys() {
        assert_eq!(repeat_key(KeyCode::Char('4')), Some(RepeatKey::Left));
        assert_eq!(repeat_key(KeyCode::Down), Some(RepeatKey::Down));
        assert_eq!(repeat_key(KeyCode::Up), None);
        assert_eq!(repeat_key(KeyCode::Char(' ')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Esc)));
    }
}
