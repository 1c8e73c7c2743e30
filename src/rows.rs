use std::ops::Range;

use serde::Serialize;

/// Words per row.
pub const ROW_SIZE: usize = 12;
/// Rows exposed to a renderer at once.
pub const VISIBLE_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    pub text: String,
    pub absolute_index: usize,
}

/// A word together with its position relative to the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordState {
    pub word: Word,
    pub is_completed: bool,
    pub is_active: bool,
    /// Only known once the word has been submitted.
    pub is_correct: Option<bool>,
}

impl WordState {
    fn derive(text: &str, absolute_index: usize, completed: &[String], current: usize) -> Self {
        let is_completed = absolute_index < current;
        Self {
            word: Word {
                text: text.to_string(),
                absolute_index,
            },
            is_completed,
            is_active: absolute_index == current,
            is_correct: if is_completed {
                completed.get(absolute_index).map(|typed| typed == text)
            } else {
                None
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRow {
    pub id: usize,
    pub words: Vec<WordState>,
    pub visible: bool,
}

impl WordRow {
    pub fn first_index(&self) -> usize {
        self.id * ROW_SIZE
    }

    pub fn contains(&self, absolute_index: usize) -> bool {
        (self.first_index()..self.first_index() + self.words.len()).contains(&absolute_index)
    }
}

/// Fixed-size rows over the whole word stream plus the slice currently on screen.
///
/// Rows are append-only: row `id` always starts at absolute index `id * ROW_SIZE`.
#[derive(Debug, Clone, Default)]
pub struct RowWindow {
    rows: Vec<WordRow>,
}

impl RowWindow {
    /// Partition `words` into rows, activating the very first word.
    pub fn rebuild(words: &[String]) -> Self {
        let mut window = Self::default();
        window.append_rows(words, 0);
        window.refresh(words, &[], 0);
        window
    }

    /// Row up `new_words`, which follow the first `already_rowed_count` words.
    ///
    /// A trailing partial row is refilled in place, keeping its id.
    pub fn append_rows(&mut self, new_words: &[String], already_rowed_count: usize) {
        let mut pending: Vec<Word> = Vec::new();
        if already_rowed_count % ROW_SIZE != 0 {
            if let Some(last) = self.rows.pop() {
                pending.extend(last.words.into_iter().map(|state| state.word));
            }
        }

        let offset = already_rowed_count - pending.len();
        pending.extend(new_words.iter().enumerate().map(|(i, text)| Word {
            text: text.clone(),
            absolute_index: already_rowed_count + i,
        }));

        for (n, chunk) in pending.chunks(ROW_SIZE).enumerate() {
            self.rows.push(WordRow {
                id: offset / ROW_SIZE + n,
                words: chunk
                    .iter()
                    .map(|word| WordState {
                        word: word.clone(),
                        is_completed: false,
                        is_active: false,
                        is_correct: None,
                    })
                    .collect(),
                visible: false,
            });
        }
    }

    /// Recompute every word state and visibility flag from the matcher's state.
    pub fn refresh(&mut self, all_words: &[String], completed: &[String], current_index: usize) {
        let visible = visible_range(self.rows.len(), current_index);
        for row in self.rows.iter_mut() {
            let first = row.first_index();
            let count = row.words.len();
            row.words = (first..first + count)
                .filter_map(|idx| {
                    all_words
                        .get(idx)
                        .map(|text| WordState::derive(text, idx, completed, current_index))
                })
                .collect();
            row.visible = visible.contains(&row.id);
        }
    }

    pub fn visible_window(&self, current_index: usize) -> &[WordRow] {
        &self.rows[visible_range(self.rows.len(), current_index)]
    }

    pub fn rows(&self) -> &[WordRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of words already placed in rows.
    pub fn rowed_count(&self) -> usize {
        self.rows
            .last()
            .map_or(0, |row| row.first_index() + row.words.len())
    }
}

/// Row ids on screen: one row of look-behind (none on the first row), at most
/// `VISIBLE_ROWS` rows in total.
pub fn visible_range(row_count: usize, current_index: usize) -> Range<usize> {
    if row_count == 0 {
        return 0..0;
    }
    // past the final word the cursor stays on the last row
    let current_row = (current_index / ROW_SIZE).min(row_count - 1);
    let start = current_row.saturating_sub(1);
    let end = row_count.min(start + VISIBLE_ROWS);
    start..end
}
