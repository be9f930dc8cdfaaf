//! Key bindings from terminal key codes to participant directions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Direction, ParticipantId, PARTICIPANT_COUNT};

/// Direction keys per participant, in [`Direction::PRIORITY`] order (up, down, left, right).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    keys: [[KeyCode; 4]; PARTICIPANT_COUNT],
}

impl Default for KeyBindings {
    /// Player 1 on WASD, player 2 on the arrow keys.
    fn default() -> Self {
        Self {
            keys: [
                [
                    KeyCode::Char('w'),
                    KeyCode::Char('s'),
                    KeyCode::Char('a'),
                    KeyCode::Char('d'),
                ],
                [KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right],
            ],
        }
    }
}

impl KeyBindings {
    pub fn new(p1: [KeyCode; 4], p2: [KeyCode; 4]) -> Self {
        Self { keys: [p1, p2] }
    }

    pub fn with_participant(mut self, id: ParticipantId, keys: [KeyCode; 4]) -> Self {
        self.keys[id.index()] = keys;
        self
    }

    /// `(direction, key)` pairs bound for one participant.
    pub fn keys_for(&self, id: ParticipantId) -> [(Direction, KeyCode); 4] {
        let keys = &self.keys[id.index()];
        [
            (Direction::Up, keys[0]),
            (Direction::Down, keys[1]),
            (Direction::Left, keys[2]),
            (Direction::Right, keys[3]),
        ]
    }

    /// Which participant and direction a key drives. Letters match case-insensitively.
    pub fn lookup(&self, code: KeyCode) -> Option<(ParticipantId, Direction)> {
        let code = normalize(code);
        ParticipantId::ALL.into_iter().find_map(|id| {
            self.keys_for(id)
                .into_iter()
                .find(|&(_, bound)| normalize(bound) == code)
                .map(|(dir, _)| (id, dir))
        })
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Check if key should end the session.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Human-readable key name for help text.
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.lookup(KeyCode::Char('w')),
            Some((ParticipantId::One, Direction::Up))
        );
        assert_eq!(
            bindings.lookup(KeyCode::Char('D')),
            Some((ParticipantId::One, Direction::Right))
        );
        assert_eq!(
            bindings.lookup(KeyCode::Left),
            Some((ParticipantId::Two, Direction::Left))
        );
        assert_eq!(
            bindings.lookup(KeyCode::Down),
            Some((ParticipantId::Two, Direction::Down))
        );
        assert_eq!(bindings.lookup(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_rebinding() {
        let bindings = KeyBindings::default().with_participant(
            ParticipantId::Two,
            [
                KeyCode::Char('i'),
                KeyCode::Char('k'),
                KeyCode::Char('j'),
                KeyCode::Char('l'),
            ],
        );
        assert_eq!(
            bindings.lookup(KeyCode::Char('J')),
            Some((ParticipantId::Two, Direction::Left))
        );
        assert_eq!(bindings.lookup(KeyCode::Up), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('w'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(key_label(KeyCode::Char('w')), "W");
        assert_eq!(key_label(KeyCode::Up), "↑");
    }
}
