use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Action),
    Start,
    Quit,
    None,
}

/// Translates terminal key presses into game commands
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Absolute steering - Arrow keys
            KeyCode::Up => KeyAction::Steer(Action::Move(Direction::Up)),
            KeyCode::Down => KeyAction::Steer(Action::Move(Direction::Down)),
            KeyCode::Left => KeyAction::Steer(Action::Move(Direction::Left)),
            KeyCode::Right => KeyAction::Steer(Action::Move(Direction::Right)),

            // Absolute steering - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Steer(Action::Move(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(Action::Move(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(Action::Move(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(Action::Move(Direction::Right))
            }

            // Relative steering
            KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char(',') => {
                KeyAction::Steer(Action::Turn(Turn::Left))
            }
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('.') => {
                KeyAction::Steer(Action::Turn(Turn::Right))
            }

            // Controls
            KeyCode::Char(' ') => KeyAction::Start,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
