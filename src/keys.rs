use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::language::accents::is_accented_letter;

/// A keystroke the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Space,
    Backspace,
    Escape,
}

/// ASCII letters and digits plus the Spanish accented letters.
pub fn is_typeable(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_accented_letter(c)
}

impl KeyInput {
    /// Normalise a raw character. Anything outside the typing alphabet is dropped.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(KeyInput::Space),
            '\u{8}' | '\u{7f}' => Some(KeyInput::Backspace),
            '\u{1b}' => Some(KeyInput::Escape),
            c if is_typeable(c) => Some(KeyInput::Char(c)),
            _ => None,
        }
    }

    /// Normalise a terminal key event. Releases and control chords are dropped.
    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(c) => Self::from_char(c),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Esc => Some(KeyInput::Escape),
            _ => None,
        }
    }

    /// Convert a string into key inputs, skipping unsupported characters.
    pub fn sequence(text: &str) -> Vec<KeyInput> {
        text.chars().filter_map(Self::from_char).collect()
    }
}
