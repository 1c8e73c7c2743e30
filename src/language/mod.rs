pub mod accents;
pub mod core;
pub mod difficulty;

// Re-export the main types for convenience
pub use self::core::{Dictionary, DictionaryStats};
pub use accents::{fold_accent, strip_accents};
pub use difficulty::Tier;
