use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// Context-sensitive: start from Idle, toggle pause while playing,
    /// reset after game over.
    Primary,
    Turn(Direction),
    Quit,
}

/// Translates one key event into a game command. Arrow keys and WASD are
/// synonymous; space is the primary action; everything else is ignored.
pub fn map_key(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char(' ') => Some(Command::Primary),
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Direction::Right)),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
