//! Per-token decision: transliterate, leave as typed, or split.
//!
//! Rules are applied in a fixed order and the first match wins, so every
//! token has exactly one classification:
//!
//! 1. non-word tokens pass through
//! 2. lexicon override
//! 3. lexicon pass-through word
//! 4. all-uppercase acronym
//! 5. meridiem after a number (`9.00 Am`)
//! 6. pass-through word or acronym followed by a case suffix (`IDeka`)
//! 7. transliterate

mod lexicon;

use serde::Serialize;
use tracing::debug;

use crate::settings::ClassifierSettings;
use crate::tokenizer::{Token, TokenKind};

pub use lexicon::{default_toml, Lexicon, LexiconError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassThroughReason {
    Foreign,
    Number,
    Symbol,
    Space,
    Lexicon,
    Acronym,
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Classification {
    Transliterate,
    PassThrough { reason: PassThroughReason },
    /// Whole-word replacement from the lexicon.
    Override { output: String },
    /// The first `literal_len` bytes stay as typed; the rest is transliterated.
    Mixed { literal_len: usize },
}

pub struct Classifier<'a> {
    lexicon: &'a Lexicon,
    settings: &'a ClassifierSettings,
}

impl<'a> Classifier<'a> {
    pub fn new(lexicon: &'a Lexicon, settings: &'a ClassifierSettings) -> Self {
        Self { lexicon, settings }
    }

    pub fn classify_all(&self, tokens: &[Token<'_>]) -> Vec<Classification> {
        (0..tokens.len()).map(|i| self.classify(tokens, i)).collect()
    }

    /// Classify `tokens[index]`. Earlier tokens are consulted for the
    /// meridiem rule.
    pub fn classify(&self, tokens: &[Token<'_>], index: usize) -> Classification {
        let token = &tokens[index];
        let reason = match token.kind {
            TokenKind::SinglishWord => None,
            TokenKind::ForeignWord => Some(PassThroughReason::Foreign),
            TokenKind::Number => Some(PassThroughReason::Number),
            TokenKind::Punctuation => Some(PassThroughReason::Symbol),
            TokenKind::Whitespace | TokenKind::LineBreak => Some(PassThroughReason::Space),
        };
        if let Some(reason) = reason {
            return Classification::PassThrough { reason };
        }

        let word = token.raw;
        let class = if let Some(output) = self.lexicon.override_for(word) {
            Classification::Override {
                output: output.to_string(),
            }
        } else if self.lexicon.is_passthrough(word) {
            Classification::PassThrough {
                reason: PassThroughReason::Lexicon,
            }
        } else if self.is_acronym(word) {
            Classification::PassThrough {
                reason: PassThroughReason::Acronym,
            }
        } else if self.is_meridiem(word) && follows_number(tokens, index) {
            Classification::PassThrough {
                reason: PassThroughReason::Time,
            }
        } else if let Some(literal_len) = self.mixed_split(word) {
            Classification::Mixed { literal_len }
        } else {
            Classification::Transliterate
        };

        if class != Classification::Transliterate {
            debug!(word, ?class, "classified");
        }
        class
    }

    fn is_acronym(&self, word: &str) -> bool {
        word.len() >= self.settings.acronym_min_len
            && word.bytes().all(|b| b.is_ascii_uppercase())
    }

    fn is_meridiem(&self, word: &str) -> bool {
        let lower = word.to_ascii_lowercase();
        self.settings.meridiem.iter().any(|m| *m == lower)
    }

    /// Longest literal prefix that is a pass-through word or acronym and is
    /// followed by a known suffix.
    fn mixed_split(&self, word: &str) -> Option<usize> {
        (1..word.len()).rev().find(|&split| {
            let (head, tail) = word.split_at(split);
            self.lexicon.is_mixed_suffix(tail)
                && (self.lexicon.is_passthrough(head) || self.is_acronym(head))
        })
    }
}

/// True when the nearest preceding non-whitespace token is a number.
/// Line breaks interrupt the lookup.
fn follows_number(tokens: &[Token<'_>], index: usize) -> bool {
    tokens[..index]
        .iter()
        .rev()
        .find(|t| t.kind != TokenKind::Whitespace)
        .is_some_and(|t| t.kind == TokenKind::Number)
}
