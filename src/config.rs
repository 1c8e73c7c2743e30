use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::Result;

pub const DEFAULT_DURATION_SECS: u32 = 30;
pub const DEFAULT_WORD_COUNT: usize = 25;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TestType {
    /// finish when the countdown reaches zero
    Time,
    /// finish when the target number of words is submitted
    Words,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Spanish,
    English,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    pub auto_start: bool,
    pub show_warnings: bool,
    /// Kept for config compatibility only; Escape always resets the test.
    pub pause_on_escape: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            auto_start: true,
            show_warnings: true,
            pause_on_escape: true,
        }
    }
}

/// Everything a host decides before a test begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub test_type: TestType,
    pub duration: Option<u32>,
    pub word_count: Option<usize>,
    pub language: Language,
    pub include_accents: bool,
    pub include_numbers: bool,
    pub timer_settings: TimerSettings,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            test_type: TestType::Time,
            duration: Some(DEFAULT_DURATION_SECS),
            word_count: Some(DEFAULT_WORD_COUNT),
            language: Language::Spanish,
            include_accents: false,
            include_numbers: false,
            timer_settings: TimerSettings::default(),
        }
    }
}

impl TestConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn timed(duration: u32) -> Self {
        Self {
            test_type: TestType::Time,
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn words(word_count: usize) -> Self {
        Self {
            test_type: TestType::Words,
            word_count: Some(word_count),
            ..Self::default()
        }
    }

    pub fn is_timed(&self) -> bool {
        self.test_type == TestType::Time
    }

    /// Countdown length for time tests, at least one second. Word tests have no ceiling.
    pub fn effective_duration(&self) -> Option<u32> {
        match self.test_type {
            TestType::Time => Some(self.duration.unwrap_or(DEFAULT_DURATION_SECS).max(1)),
            TestType::Words => None,
        }
    }

    pub fn target_words(&self) -> Option<usize> {
        match self.test_type {
            TestType::Time => None,
            TestType::Words => Some(self.word_count.unwrap_or(DEFAULT_WORD_COUNT).max(1)),
        }
    }
}
