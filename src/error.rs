use thiserror::Error;

use crate::language::Tier;

#[derive(Error, Debug)]
pub enum TypewriterError {
    #[error("Dictionary Error: no words for {language} / {tier}")]
    EmptyDictionary { language: String, tier: Tier },

    #[error("Dictionary Error: {0} not found")]
    MissingDictionary(String),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TypewriterError>;
