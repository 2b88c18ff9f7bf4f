use crossterm::event::KeyCode;

use crate::session::Dir;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Move(Dir),
    NewGame,
    Quit,
}

/// Arrow keys and WASD both steer; anything else is ignored.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Move(Dir::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Move(Dir::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Move(Dir::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Move(Dir::Right)),
        KeyCode::Char('n') => Some(Command::NewGame),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd_map_to_the_same_moves() {
        assert_eq!(command_for_key(KeyCode::Up), command_for_key(KeyCode::Char('w')));
        assert_eq!(command_for_key(KeyCode::Down), command_for_key(KeyCode::Char('s')));
        assert_eq!(command_for_key(KeyCode::Left), command_for_key(KeyCode::Char('a')));
        assert_eq!(command_for_key(KeyCode::Right), command_for_key(KeyCode::Char('d')));
        assert_eq!(command_for_key(KeyCode::Up), Some(Command::Move(Dir::Up)));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(command_for_key(KeyCode::Char('x')), None);
        assert_eq!(command_for_key(KeyCode::Tab), None);
    }
}
