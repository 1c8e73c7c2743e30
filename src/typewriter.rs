use tracing::{debug, info};

use crate::{
    clock::{TestClock, TickOutcome},
    config::TestConfig,
    error::Result,
    keys::KeyInput,
    language::DictionaryStats,
    matcher::{InputMatcher, KeyOutcome},
    rows::RowWindow,
    session::{TestState, TestView},
    stats::{StatisticsCollector, TestStatistics},
    word_generator::{WordGenConfig, WordStream, INITIAL_TIMED_WORDS, REFILL_BATCH, REFILL_THRESHOLD},
};

/// One typing test: stream, rows, matcher, clock and statistics wired together.
///
/// Every keystroke and tick runs to completion before the next event is taken,
/// so the matcher's completed list always lines up with its cursor.
pub struct Typewriter {
    config: TestConfig,
    stream: WordStream,
    preset: Option<Vec<String>>,
    rows: RowWindow,
    matcher: InputMatcher,
    clock: TestClock,
    stats: StatisticsCollector,
}

impl Typewriter {
    pub fn new(config: TestConfig) -> Result<Self> {
        let stream = WordStream::new(WordGenConfig::from(&config))?;
        Ok(Self::assemble(config, stream, None))
    }

    /// Deterministic word stream, for tests and replays.
    pub fn seeded(config: TestConfig, seed: u64) -> Result<Self> {
        let stream = WordStream::seeded(WordGenConfig::from(&config), seed)?;
        Ok(Self::assemble(config, stream, None))
    }

    /// Start from a fixed word list instead of generated words. Resets reuse it;
    /// time tests still refill from the dictionary once it runs low.
    pub fn with_words(config: TestConfig, words: Vec<String>) -> Result<Self> {
        let stream = WordStream::new(WordGenConfig::from(&config))?;
        Ok(Self::assemble(config, stream, Some(words)))
    }

    fn assemble(config: TestConfig, stream: WordStream, preset: Option<Vec<String>>) -> Self {
        let mut typewriter = Self {
            config,
            stream,
            preset,
            rows: RowWindow::default(),
            matcher: InputMatcher::default(),
            clock: TestClock::new(),
            stats: StatisticsCollector::new(),
        };
        typewriter.rebuild();
        typewriter
    }

    /// Throw away all progress and start over on fresh words.
    fn rebuild(&mut self) {
        let words = match &self.preset {
            Some(words) => words.clone(),
            None => {
                let count = self.config.target_words().unwrap_or(INITIAL_TIMED_WORDS);
                self.stream.generate(count)
            }
        };
        self.rows = RowWindow::rebuild(&words);
        self.matcher.reset(words);
        self.clock.reset();
        if let Some(duration) = self.config.effective_duration() {
            self.clock.set_duration(duration);
        }
        self.stats.reset();
    }

    /// Escape: cancel the clock and regenerate from the active configuration.
    pub fn reset(&mut self) {
        self.rebuild();
        info!(test_type = %self.config.test_type, "test reset");
    }

    /// Swap in a new configuration and rebuild everything.
    pub fn reconfigure(&mut self, config: TestConfig) -> Result<()> {
        let gen_config = WordGenConfig::from(&config);
        if gen_config != self.stream.config() {
            self.stream = WordStream::new(gen_config)?;
        }
        self.config = config;
        self.preset = None;
        self.reset();
        Ok(())
    }

    /// Begin the test explicitly. Only valid while waiting.
    pub fn start(&mut self) -> bool {
        if self.state() != TestState::Waiting {
            return false;
        }
        self.stats.reset();
        match self.config.effective_duration() {
            Some(duration) => self.clock.start(duration),
            None => self.clock.start_stopwatch(),
        }
    }

    pub fn pause(&mut self) -> bool {
        self.clock.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.clock.resume()
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state() {
            TestState::Running => self.pause(),
            TestState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Shift the countdown by `delta` seconds. A running or paused test that is
    /// left with no time finishes on the spot.
    pub fn add_time(&mut self, delta: i64) -> bool {
        if !self.clock.add_time(delta) {
            return false;
        }
        let started = matches!(self.state(), TestState::Running | TestState::Paused);
        if started && self.clock.time_remaining() == 0 && self.clock.finish() {
            self.finalize();
        }
        true
    }

    /// Apply one normalised keystroke.
    pub fn handle_key(&mut self, key: KeyInput) -> KeyOutcome {
        if key == KeyInput::Escape {
            self.reset();
            return KeyOutcome::ResetRequested;
        }

        let waiting = match self.state() {
            TestState::Running => false,
            TestState::Waiting if self.config.timer_settings.auto_start => true,
            state => {
                debug!(%state, ?key, "key ignored");
                return KeyOutcome::Ignored;
            }
        };

        let outcome = self.matcher.handle(key);
        if outcome == KeyOutcome::Ignored {
            return outcome;
        }
        if waiting {
            self.start();
        }

        match outcome {
            KeyOutcome::Typed { correct } => self.stats.record_char(correct),
            KeyOutcome::Advanced => {
                if self.config.is_timed() && self.matcher.remaining_words() < REFILL_THRESHOLD {
                    self.refill();
                }
                self.refresh_rows();
                self.check_word_target();
            }
            KeyOutcome::Retreated => self.refresh_rows(),
            KeyOutcome::Deleted | KeyOutcome::Ignored | KeyOutcome::ResetRequested => {}
        }
        outcome
    }

    /// One second of wall time has passed.
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.clock.tick();
        if outcome == TickOutcome::Ignored {
            return outcome;
        }
        self.stats.sample(self.clock.elapsed());

        if outcome == TickOutcome::Finished {
            self.finalize();
        } else {
            self.check_word_target();
        }
        outcome
    }

    fn refill(&mut self) {
        let already = self.matcher.words().len();
        let more = self.stream.extend(REFILL_BATCH);
        self.rows.append_rows(&more, already);
        self.matcher.extend_words(more);
    }

    fn refresh_rows(&mut self) {
        self.rows.refresh(
            self.matcher.words(),
            self.matcher.completed(),
            self.matcher.current_index(),
        );
    }

    /// Word tests end once the target is submitted; the clock is stopped where it stands.
    fn check_word_target(&mut self) {
        let Some(target) = self.config.target_words() else {
            return;
        };
        let done = self.matcher.completed().len() >= target || self.matcher.remaining_words() == 0;
        if done && self.clock.finish() {
            self.finalize();
        }
    }

    fn finalize(&mut self) {
        self.stats.finish(&self.matcher, self.clock.elapsed(), &self.config);
    }

    pub fn view(&self) -> TestView<'_> {
        let progress = match self.config.target_words() {
            Some(target) => {
                (self.matcher.completed().len().min(target) as f64 / target as f64) * 100.0
            }
            None => self.clock.progress(),
        };

        TestView {
            rows: self.rows.visible_window(self.matcher.current_index()),
            active_word: self.matcher.char_states(),
            current_input: self.matcher.current_input(),
            current_index: self.matcher.current_index(),
            state: self.state(),
            time: self.clock.formatted_time(),
            progress,
            is_warning: self.config.timer_settings.show_warnings && self.clock.is_warning(),
            live_wpm: self.stats.wpm_at(self.clock.elapsed()),
            report: self.stats.report(),
        }
    }

    pub fn state(&self) -> TestState {
        self.clock.state()
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    pub fn matcher(&self) -> &InputMatcher {
        &self.matcher
    }

    pub fn clock(&self) -> &TestClock {
        &self.clock
    }

    pub fn rows(&self) -> &RowWindow {
        &self.rows
    }

    pub fn stats(&self) -> &StatisticsCollector {
        &self.stats
    }

    pub fn report(&self) -> Option<&TestStatistics> {
        self.stats.report()
    }

    pub fn dictionary_stats(&self) -> DictionaryStats {
        self.stream.dictionary_stats()
    }
}
