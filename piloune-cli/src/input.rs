use crossterm::event::KeyCode;
use piloune_game::ActionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Do(ActionId),
    Reset,
    MaxStats,
    Quit,
}

pub fn map_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('s') => Some(Command::Do(ActionId::Sugar)),
        KeyCode::Char('i') => Some(Command::Do(ActionId::Iris)),
        KeyCode::Char('t') => Some(Command::Do(ActionId::Twitch)),
        KeyCode::Char('n') => Some(Command::Do(ActionId::Nap)),
        KeyCode::Char('d') => Some(Command::Do(ActionId::Sleep)),
        KeyCode::Char('c') => Some(Command::Do(ActionId::Coffee)),
        KeyCode::Char('h') => Some(Command::Do(ActionId::Hug)),
        KeyCode::Char('k') => Some(Command::Do(ActionId::CocoPops)),
        KeyCode::Char('v') => Some(Command::Do(ActionId::InventTdah)),
        KeyCode::Char('f') => Some(Command::Do(ActionId::Feelings)),
        KeyCode::Char('w') => Some(Command::Do(ActionId::Shower)),
        KeyCode::Char('p') => Some(Command::Do(ActionId::Spa)),
        KeyCode::Char('x') => Some(Command::Reset),
        KeyCode::Char('m') => Some(Command::MaxStats),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

// ↑↑↓↓←→←→BA
const KONAMI: [KeyCode; 10] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

/// Tracks progress through the secret key sequence. Any wrong key resets
/// it from the start.
#[derive(Debug, Default)]
pub struct KonamiTracker {
    index: usize,
}

impl KonamiTracker {
    /// Feed one key press; true when the full sequence just completed.
    pub fn advance(&mut self, code: KeyCode) -> bool {
        if code == KONAMI[self.index] {
            self.index += 1;
            if self.index == KONAMI.len() {
                self.index = 0;
                return true;
            }
        } else {
            self.index = 0;
        }
        false
    }
}
