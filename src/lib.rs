// Library surface: the typing-test engine, consumed by the terminal host in
// main.rs and by the headless integration tests.
pub mod clock;
pub mod config;
pub mod error;
pub mod keys;
pub mod language;
pub mod matcher;
pub mod rows;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod time_series;
pub mod typewriter;
pub mod util;
pub mod word_generator;

pub use config::TestConfig;
pub use error::{Result, TypewriterError};
pub use keys::KeyInput;
pub use session::{TestState, TestView};
pub use stats::TestStatistics;
pub use typewriter::Typewriter;
