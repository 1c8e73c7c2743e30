use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use serde_json::from_str;

use super::Tier;
use crate::config::Language;
use crate::error::{Result, TypewriterError};

static LANG_DIR: Dir = include_dir!("src/lang");

#[derive(Deserialize, Clone, Debug)]
pub struct Tiers {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

/// Word lists for one language, bucketed by difficulty.
#[derive(Deserialize, Clone, Debug)]
pub struct Dictionary {
    pub name: String,
    pub tiers: Tiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DictionaryStats {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub total: usize,
}

impl Dictionary {
    /// Load the embedded dictionary for `language`, rejecting any empty tier.
    pub fn load(language: Language) -> Result<Self> {
        let dict = read_dictionary_from_file(&format!("{language}.json"))?;
        dict.validate()?;
        Ok(dict)
    }

    pub fn validate(&self) -> Result<()> {
        for tier in Tier::ALL {
            if self.words(tier).is_empty() {
                return Err(TypewriterError::EmptyDictionary {
                    language: self.name.clone(),
                    tier,
                });
            }
        }
        Ok(())
    }

    pub fn words(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Easy => &self.tiers.easy,
            Tier::Medium => &self.tiers.medium,
            Tier::Hard => &self.tiers.hard,
        }
    }

    pub fn stats(&self) -> DictionaryStats {
        let easy = self.tiers.easy.len();
        let medium = self.tiers.medium.len();
        let hard = self.tiers.hard.len();
        DictionaryStats {
            easy,
            medium,
            hard,
            total: easy + medium + hard,
        }
    }
}

fn read_dictionary_from_file(file_name: &str) -> Result<Dictionary> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| TypewriterError::MissingDictionary(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| TypewriterError::MissingDictionary(file_name.to_string()))?;

    Ok(from_str(file_as_str)?)
}
