use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use crate::unicode::is_latin_word;

pub(crate) const DEFAULT_TOML: &str = include_str!("default_lexicon.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconConfig {
    version: u32,
    #[serde(default)]
    passthrough: PassthroughSection,
    #[serde(default)]
    overrides: HashMap<String, String>,
    #[serde(default)]
    mixed: MixedSection,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PassthroughSection {
    #[serde(default)]
    words: Vec<String>,
    #[serde(default)]
    names: Vec<String>,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MixedSection {
    #[serde(default)]
    suffixes: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid lexicon word: {0:?}")]
    InvalidWord(String),
    #[error("empty override for word: {0}")]
    EmptyOverride(String),
    #[error("word is both pass-through and overridden: {0}")]
    Conflict(String),
    #[error("invalid mixed suffix: {0:?}")]
    InvalidSuffix(String),
    #[error("lexicon already initialized")]
    AlreadyInitialized,
}

/// Word lists consulted by the classifier. Keys are stored lowercased.
#[derive(Debug)]
pub struct Lexicon {
    version: u32,
    passthrough: HashSet<String>,
    overrides: HashMap<String, String>,
    suffixes: HashSet<String>,
}

impl Lexicon {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), LexiconError> {
        Lexicon::from_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| LexiconError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> Arc<Lexicon> {
        static INSTANCE: OnceLock<Arc<Lexicon>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                let toml_str = CUSTOM_TOML
                    .get()
                    .map(|s| s.as_str())
                    .unwrap_or(DEFAULT_TOML);
                Arc::new(Lexicon::from_toml(toml_str).expect("lexicon TOML must be valid"))
            })
            .clone()
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, LexiconError> {
        let config: LexiconConfig =
            toml::from_str(toml_str).map_err(|e| LexiconError::Parse(e.to_string()))?;

        let mut passthrough = HashSet::new();
        for word in config
            .passthrough
            .words
            .iter()
            .chain(&config.passthrough.names)
        {
            passthrough.insert(normalize_word(word)?);
        }

        let mut overrides = HashMap::new();
        for (word, output) in config.overrides {
            let key = normalize_word(&word)?;
            if output.is_empty() {
                return Err(LexiconError::EmptyOverride(word));
            }
            if passthrough.contains(&key) {
                return Err(LexiconError::Conflict(word));
            }
            overrides.insert(key, output);
        }

        let mut suffixes = HashSet::new();
        for suffix in config.mixed.suffixes {
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(LexiconError::InvalidSuffix(suffix));
            }
            suffixes.insert(suffix);
        }

        Ok(Lexicon {
            version: config.version,
            passthrough,
            overrides,
            suffixes,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_passthrough(&self, word: &str) -> bool {
        self.passthrough.contains(&word.to_ascii_lowercase())
    }

    pub fn override_for(&self, word: &str) -> Option<&str> {
        self.overrides
            .get(&word.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    pub fn is_mixed_suffix(&self, tail: &str) -> bool {
        self.suffixes.contains(&tail.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.passthrough.len() + self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the embedded default lexicon TOML.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

fn normalize_word(word: &str) -> Result<String, LexiconError> {
    if !is_latin_word(word) {
        return Err(LexiconError::InvalidWord(word.to_string()));
    }
    Ok(word.to_ascii_lowercase())
}
