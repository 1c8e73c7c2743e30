use rand::{rngs::StdRng, seq::index, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::{
    config::{Language, TestConfig},
    error::Result,
    language::{strip_accents, Dictionary, DictionaryStats, Tier},
};

/// Share of a batch replaced by numerals when numbers are enabled.
pub const NUMBER_RATIO: f64 = 0.15;
/// Words generated up front for a time test.
pub const INITIAL_TIMED_WORDS: usize = 120;
/// Time tests refill once fewer words than this remain ahead of the cursor.
pub const REFILL_THRESHOLD: usize = 30;
/// Words appended per refill.
pub const REFILL_BATCH: usize = 60;

/// Configuration for word generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordGenConfig {
    pub language: Language,
    pub include_accents: bool,
    pub include_numbers: bool,
}

impl From<&TestConfig> for WordGenConfig {
    fn from(cfg: &TestConfig) -> Self {
        Self {
            language: cfg.language,
            include_accents: cfg.include_accents,
            include_numbers: cfg.include_numbers,
        }
    }
}

/// Produces practice words from a weighted dictionary
pub struct WordStream {
    config: WordGenConfig,
    dictionary: Dictionary,
    rng: StdRng,
}

impl WordStream {
    pub fn new(config: WordGenConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn seeded(config: WordGenConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: WordGenConfig, rng: StdRng) -> Result<Self> {
        let dictionary = Dictionary::load(config.language)?;
        Ok(Self {
            config,
            dictionary,
            rng,
        })
    }

    pub fn config(&self) -> WordGenConfig {
        self.config
    }

    pub fn dictionary_stats(&self) -> DictionaryStats {
        self.dictionary.stats()
    }

    /// Build a fresh batch of `count` words.
    ///
    /// Words are drawn first; numeral substitution runs over the finished batch
    /// so its share is always taken from `count`.
    pub fn generate(&mut self, count: usize) -> Vec<String> {
        let mut words: Vec<String> = (0..count).map(|_| self.pick_word()).collect();

        if self.config.include_numbers {
            self.substitute_numbers(&mut words);
        }

        words
    }

    /// A follow-up batch for a time test that is running out of words.
    pub fn extend(&mut self, count: usize) -> Vec<String> {
        debug!(count, "extending word stream");
        self.generate(count)
    }

    fn pick_word(&mut self) -> String {
        let tier = Tier::from_draw(self.rng.gen::<f64>());
        // tiers are validated non-empty when the dictionary loads
        let word = self
            .dictionary
            .words(tier)
            .choose(&mut self.rng)
            .map(String::as_str)
            .unwrap_or_default();

        if self.config.include_accents {
            word.to_string()
        } else {
            strip_accents(word)
        }
    }

    fn substitute_numbers(&mut self, words: &mut [String]) {
        let amount = (words.len() as f64 * NUMBER_RATIO).floor() as usize;
        for idx in index::sample(&mut self.rng, words.len(), amount) {
            words[idx] = self.rng.gen_range(1..=100).to_string();
        }
    }
}
