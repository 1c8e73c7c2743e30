use serde::Serialize;

use crate::{
    clock::ClockState,
    matcher::CharState,
    rows::WordRow,
    stats::TestStatistics,
};

/// Lifecycle of a test as seen by a host.
pub type TestState = ClockState;

/// Read-only snapshot handed to a renderer after every event.
#[derive(Debug, Clone, Serialize)]
pub struct TestView<'a> {
    /// At most three contiguous rows around the cursor.
    pub rows: &'a [WordRow],
    pub active_word: Vec<CharState>,
    pub current_input: &'a str,
    pub current_index: usize,
    pub state: TestState,
    /// `M:SS`: remaining for time tests, elapsed for word tests.
    pub time: String,
    pub progress: f64,
    pub is_warning: bool,
    pub live_wpm: u32,
    pub report: Option<&'a TestStatistics>,
}

impl TestView<'_> {
    pub fn is_finished(&self) -> bool {
        self.state == TestState::Finished
    }
}
