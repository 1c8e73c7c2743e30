use itertools::Itertools;
use serde::Serialize;
use tracing::info;

use crate::{
    config::{Language, TestConfig, TestType},
    matcher::InputMatcher,
    time_series::{TimeSeriesPoint, WpmSample},
    util::{percentage, std_dev, words_per_minute},
};

/// The parts of the configuration that describe the finished test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEcho {
    pub test_type: TestType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    pub language: Language,
    pub include_accents: bool,
    pub include_numbers: bool,
}

impl From<&TestConfig> for ConfigEcho {
    fn from(cfg: &TestConfig) -> Self {
        Self {
            test_type: cfg.test_type,
            duration: cfg.effective_duration(),
            word_count: cfg.target_words(),
            language: cfg.language,
            include_accents: cfg.include_accents,
            include_numbers: cfg.include_numbers,
        }
    }
}

/// Final report, produced once per test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestStatistics {
    pub wpm: u32,
    /// Every typed character counted, right or wrong.
    pub raw_wpm: u32,
    pub accuracy_pct: u32,
    pub total_chars: usize,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub total_words: usize,
    pub correct_words: usize,
    pub elapsed_seconds: u32,
    /// Spread of the per-second WPM samples.
    pub wpm_std_dev: f64,
    pub config: ConfigEcho,
    pub wpm_over_time: Vec<TimeSeriesPoint>,
}

/// Character counters plus one WPM sample per clock tick.
#[derive(Debug, Clone, Default)]
pub struct StatisticsCollector {
    total_chars: usize,
    correct_chars: usize,
    samples: Vec<WpmSample>,
    report: Option<TestStatistics>,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything from a previous test.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Count an accepted keystroke. Deletions never uncount.
    pub fn record_char(&mut self, correct: bool) {
        self.total_chars += 1;
        if correct {
            self.correct_chars += 1;
        }
    }

    /// Append a sample at `elapsed` seconds; a sample not later than the
    /// previous one is dropped.
    pub fn sample(&mut self, elapsed: u32) -> Option<WpmSample> {
        if self
            .samples
            .last()
            .is_some_and(|last| last.elapsed_seconds >= elapsed)
        {
            return None;
        }
        let sample = WpmSample {
            elapsed_seconds: elapsed,
            wpm: self.wpm_at(elapsed),
            chars_typed: self.total_chars,
        };
        self.samples.push(sample);
        Some(sample)
    }

    pub fn wpm_at(&self, elapsed: u32) -> u32 {
        words_per_minute(self.correct_chars, elapsed)
    }

    pub fn accuracy(&self) -> u32 {
        percentage(self.correct_chars, self.total_chars)
    }

    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn correct_chars(&self) -> usize {
        self.correct_chars
    }

    pub fn samples(&self) -> &[WpmSample] {
        &self.samples
    }

    /// Compute the final report. Later calls return the first report.
    pub fn finish(
        &mut self,
        matcher: &InputMatcher,
        elapsed: u32,
        config: &TestConfig,
    ) -> &TestStatistics {
        let (total_chars, correct_chars, samples) =
            (self.total_chars, self.correct_chars, &self.samples);

        self.report.get_or_insert_with(|| {
            let sampled_wpm = samples.iter().map(|s| s.wpm as f64).collect_vec();
            let report = TestStatistics {
                wpm: words_per_minute(correct_chars, elapsed),
                raw_wpm: words_per_minute(total_chars, elapsed),
                accuracy_pct: percentage(correct_chars, total_chars),
                total_chars,
                correct_chars,
                incorrect_chars: total_chars - correct_chars,
                total_words: matcher.completed().len(),
                correct_words: matcher.correct_words(),
                elapsed_seconds: elapsed,
                wpm_std_dev: std_dev(&sampled_wpm).unwrap_or(0.0),
                config: ConfigEcho::from(config),
                wpm_over_time: samples.iter().map(TimeSeriesPoint::from).collect(),
            };
            info!(
                wpm = report.wpm,
                accuracy = report.accuracy_pct,
                words = report.total_words,
                "test finished"
            );
            report
        })
    }

    pub fn report(&self) -> Option<&TestStatistics> {
        self.report.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyInput;

    fn record(stats: &mut StatisticsCollector, correct: usize, incorrect: usize) {
        for _ in 0..correct {
            stats.record_char(true);
        }
        for _ in 0..incorrect {
            stats.record_char(false);
        }
    }

    #[test]
    fn test_wpm_and_accuracy() {
        let mut stats = StatisticsCollector::new();
        record(&mut stats, 8, 2);

        assert_eq!(stats.wpm_at(60), 2);
        assert_eq!(stats.accuracy(), 80);
    }

    #[test]
    fn test_no_time_means_zero_wpm() {
        let mut stats = StatisticsCollector::new();
        record(&mut stats, 20, 0);
        assert_eq!(stats.wpm_at(0), 0);
    }

    #[test]
    fn test_accuracy_without_input() {
        assert_eq!(StatisticsCollector::new().accuracy(), 0);
    }

    #[test]
    fn test_samples_are_strictly_increasing() {
        let mut stats = StatisticsCollector::new();
        record(&mut stats, 10, 0);

        assert!(stats.sample(1).is_some());
        assert!(stats.sample(2).is_some());
        assert!(stats.sample(2).is_none());
        assert!(stats.sample(1).is_none());

        let elapsed: Vec<u32> = stats.samples().iter().map(|s| s.elapsed_seconds).collect();
        assert_eq!(elapsed, vec![1, 2]);
    }

    #[test]
    fn test_sample_values() {
        let mut stats = StatisticsCollector::new();
        record(&mut stats, 25, 5);
        let sample = stats.sample(30).unwrap();

        assert_eq!(sample.wpm, 10);
        assert_eq!(sample.chars_typed, 30);
    }

    #[test]
    fn test_finish_builds_report() {
        let mut matcher = InputMatcher::new(vec!["the".into(), "of".into(), "and".into()]);
        let mut stats = StatisticsCollector::new();
        for key in KeyInput::sequence("the ox ") {
            if let crate::matcher::KeyOutcome::Typed { correct } = matcher.handle(key) {
                stats.record_char(correct);
            }
        }
        stats.sample(1);
        stats.sample(2);

        let cfg = TestConfig::words(3);
        let report = stats.finish(&matcher, 60, &cfg).clone();

        assert_eq!(report.total_chars, 5);
        assert_eq!(report.correct_chars, 4);
        assert_eq!(report.incorrect_chars, 1);
        assert_eq!(report.accuracy_pct, 80);
        assert_eq!(report.total_words, 2);
        assert_eq!(report.correct_words, 1);
        assert_eq!(report.wpm, 1);
        assert_eq!(report.raw_wpm, 1);
        assert_eq!(report.wpm_over_time.len(), 2);
        assert_eq!(report.config.word_count, Some(3));
        assert_eq!(report.config.duration, None);
        assert_eq!(stats.report(), Some(&report));
    }

    #[test]
    fn test_finish_is_computed_once() {
        let matcher = InputMatcher::new(vec!["a".into()]);
        let mut stats = StatisticsCollector::new();
        let cfg = TestConfig::timed(30);
        let first = stats.finish(&matcher, 30, &cfg).clone();
        stats.record_char(true);
        let second = stats.finish(&matcher, 31, &cfg).clone();

        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut stats = StatisticsCollector::new();
        record(&mut stats, 3, 1);
        stats.sample(1);
        stats.finish(&InputMatcher::default(), 1, &TestConfig::default());
        stats.reset();

        assert_eq!(stats.total_chars(), 0);
        assert!(stats.samples().is_empty());
        assert!(stats.report().is_none());
    }

    #[test]
    fn test_report_serializes() {
        let mut stats = StatisticsCollector::new();
        let report = stats.finish(&InputMatcher::default(), 0, &TestConfig::timed(15));
        let json = serde_json::to_value(report).unwrap();

        assert_eq!(json["config"]["test_type"], "time");
        assert_eq!(json["config"]["duration"], 15);
        assert!(json["config"].get("word_count").is_none());
    }
}
