//! Global settings loaded from TOML, following the same OnceLock pattern as
//! the grapheme table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub transliterator: TransliteratorSettings,
    pub classifier: ClassifierSettings,
    pub assembler: AssemblerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransliteratorSettings {
    pub max_backtrack_steps: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    pub acronym_min_len: usize,
    #[serde(default)]
    pub meridiem: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssemblerSettings {
    pub collapse_interior_spaces: bool,
    pub question_mark: String,
    #[serde(default)]
    pub question_suffixes: Vec<QuestionSuffix>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionSuffix {
    pub ending: String,
    #[serde(default)]
    rewrite: Option<String>,
}

impl QuestionSuffix {
    pub fn rewrite(&self) -> &str {
        self.rewrite.as_deref().unwrap_or(&self.ending)
    }
}

impl AssemblerSettings {
    /// Longest configured ending that `word` ends with (ASCII case-insensitive).
    pub fn question_suffix_for(&self, word: &str) -> Option<&QuestionSuffix> {
        let lower = word.to_ascii_lowercase();
        self.question_suffixes
            .iter()
            .filter(|s| lower.ends_with(s.ending.as_str()))
            .max_by_key(|s| s.ending.len())
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    for m in &mut s.classifier.meridiem {
        m.make_ascii_lowercase();
    }
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(transliterator.max_backtrack_steps);
    check_positive_usize!(classifier.acronym_min_len);

    if s.assembler.question_mark.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "assembler.question_mark".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    for (i, q) in s.assembler.question_suffixes.iter().enumerate() {
        for (name, value) in [("ending", q.ending.as_str()), ("rewrite", q.rewrite())] {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(SettingsError::InvalidValue {
                    field: format!("assembler.question_suffixes[{i}].{name}"),
                    reason: "must be non-empty lowercase ASCII letters".to_string(),
                });
            }
        }
    }
    for m in &s.classifier.meridiem {
        if m.is_empty() || !m.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(SettingsError::InvalidValue {
                field: "classifier.meridiem".to_string(),
                reason: format!("{m:?} must be ASCII letters"),
            });
        }
    }

    Ok(())
}
