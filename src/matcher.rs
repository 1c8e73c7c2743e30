use serde::Serialize;

use crate::keys::KeyInput;

/// What a single keystroke did to the matcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Out-of-range or unsupported; state is unchanged.
    Ignored,
    /// A character was appended to the active word.
    Typed { correct: bool },
    /// The last character of the active word was removed.
    Deleted,
    /// The active word was submitted and the cursor moved forward.
    Advanced,
    /// The cursor moved back into the previous word.
    Retreated,
    /// Escape; the owner decides how to rebuild the test.
    ResetRequested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CharMatch {
    NotTyped,
    Correct,
    Incorrect,
    /// The next character to type.
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CharState {
    pub expected: char,
    pub state: CharMatch,
}

/// Keystroke state machine over the word stream.
///
/// `completed` is index-aligned with the stream: its length always equals
/// `current_index`.
#[derive(Debug, Clone, Default)]
pub struct InputMatcher {
    words: Vec<String>,
    current_index: usize,
    current_input: String,
    completed: Vec<String>,
}

impl InputMatcher {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            ..Self::default()
        }
    }

    pub fn handle(&mut self, key: KeyInput) -> KeyOutcome {
        match key {
            KeyInput::Char(c) => self.type_char(c),
            KeyInput::Space => self.submit(),
            KeyInput::Backspace => self.backspace(),
            KeyInput::Escape => KeyOutcome::ResetRequested,
        }
    }

    /// Append `c` if the active word still has room for it.
    pub fn type_char(&mut self, c: char) -> KeyOutcome {
        let Some(word) = self.words.get(self.current_index) else {
            return KeyOutcome::Ignored;
        };
        let pos = self.current_input.chars().count();
        let Some(expected) = word.chars().nth(pos) else {
            return KeyOutcome::Ignored;
        };

        self.current_input.push(c);
        KeyOutcome::Typed {
            correct: c == expected,
        }
    }

    pub fn submit(&mut self) -> KeyOutcome {
        if self.current_input.is_empty() || self.current_index >= self.words.len() {
            return KeyOutcome::Ignored;
        }

        self.completed.push(std::mem::take(&mut self.current_input));
        self.current_index += 1;
        KeyOutcome::Advanced
    }

    pub fn backspace(&mut self) -> KeyOutcome {
        if self.current_input.pop().is_some() {
            return KeyOutcome::Deleted;
        }
        match self.completed.pop() {
            Some(previous) => {
                self.current_index -= 1;
                self.current_input = previous;
                KeyOutcome::Retreated
            }
            None => KeyOutcome::Ignored,
        }
    }

    /// Start over on a new stream.
    pub fn reset(&mut self, words: Vec<String>) {
        *self = Self::new(words);
    }

    pub fn extend_words(&mut self, more: Vec<String>) {
        self.words.extend(more);
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.current_index).map(String::as_str)
    }

    /// Words ahead of the cursor, the active one included.
    pub fn remaining_words(&self) -> usize {
        self.words.len() - self.current_index
    }

    /// Exact-match verdict for a submitted word; `None` for anything not yet submitted.
    pub fn is_correct(&self, idx: usize) -> Option<bool> {
        self.completed
            .get(idx)
            .zip(self.words.get(idx))
            .map(|(typed, expected)| typed == expected)
    }

    pub fn correct_words(&self) -> usize {
        self.completed
            .iter()
            .zip(self.words.iter())
            .filter(|(typed, expected)| typed == expected)
            .count()
    }

    /// Per-character match state of the active word.
    pub fn char_states(&self) -> Vec<CharState> {
        let Some(word) = self.current_word() else {
            return vec![];
        };
        let typed: Vec<char> = self.current_input.chars().collect();

        word.chars()
            .enumerate()
            .map(|(idx, expected)| {
                let state = match typed.get(idx) {
                    Some(&c) if c == expected => CharMatch::Correct,
                    Some(_) => CharMatch::Incorrect,
                    None if idx == typed.len() => CharMatch::Active,
                    None => CharMatch::NotTyped,
                };
                CharState { expected, state }
            })
            .collect()
    }
}
