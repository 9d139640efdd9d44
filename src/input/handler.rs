use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

/// Maps key presses to actions, depending on whether the game is running.
///
/// Steering only applies while running and restarting only once the game is
/// over; quitting works in both phases.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, phase: Phase) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
            _ => {}
        }

        match phase {
            Phase::Running => match Self::direction_for(key.code) {
                Some(direction) => KeyAction::Steer(direction),
                None => KeyAction::None,
            },
            Phase::GameOver => match key.code {
                KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
                _ => KeyAction::None,
            },
        }
    }

    fn direction_for(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
