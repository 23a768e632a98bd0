//! Word-level transliteration: one Singlish word to Sinhala.
//!
//! The word is decomposed into grapheme rules by a bounded backtracking
//! search over longest-first candidates. When no decomposition maps every
//! character, a greedy pass keeps what it can and copies the rest through.

mod render;
mod search;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::graphemes::{GraphemeTable, RuleId};
use crate::settings::TransliteratorSettings;
use crate::tokenizer::{Span, Token};

use render::Renderer;
use search::{decompose, greedy, SearchOutcome, Step};

/// A grapheme rule applied to part of the word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRule {
    pub rule: RuleId,
    pub span: Span,
    /// False when the rule matched only after lower-casing.
    pub exact_case: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransliterationResult {
    pub source_token: String,
    pub output: String,
    pub matched_rules: Vec<AppliedRule>,
    /// Characters copied through verbatim.
    pub unmapped: Vec<Span>,
}

impl TransliterationResult {
    pub fn is_complete(&self) -> bool {
        self.unmapped.is_empty()
    }
}

pub struct WordTransliterator<'a> {
    table: &'a GraphemeTable,
    settings: &'a TransliteratorSettings,
}

impl<'a> WordTransliterator<'a> {
    pub fn new(table: &'a GraphemeTable, settings: &'a TransliteratorSettings) -> Self {
        Self { table, settings }
    }

    /// Transliterate `word`. Spans are byte offsets into `word`.
    pub fn transliterate(&self, word: &str) -> TransliterationResult {
        self.transliterate_at(word, 0)
    }

    /// Transliterate a token; spans are byte offsets into the tokenized buffer.
    pub fn transliterate_token(&self, token: &Token<'_>) -> TransliterationResult {
        self.transliterate_at(token.raw, token.span.start)
    }

    pub(crate) fn transliterate_at(&self, word: &str, offset: usize) -> TransliterationResult {
        let _span = debug_span!("transliterate_word", word).entered();

        let exact = word.as_bytes();
        let folded = word.to_ascii_lowercase();
        let steps = match decompose(
            self.table,
            exact,
            folded.as_bytes(),
            self.settings.max_backtrack_steps,
        ) {
            SearchOutcome::Found(steps) => steps,
            outcome => {
                let budget_exceeded = matches!(outcome, SearchOutcome::BudgetExceeded);
                debug!(budget_exceeded, "no full decomposition, greedy fallback");
                greedy(self.table, word, exact, folded.as_bytes())
            }
        };

        let mut renderer = Renderer::default();
        let mut matched_rules = Vec::with_capacity(steps.len());
        let mut unmapped = Vec::new();
        for step in steps {
            match step {
                Step::Rule { pos, candidate } => {
                    renderer.push_rule(self.table.rule(candidate.rule));
                    matched_rules.push(AppliedRule {
                        rule: candidate.rule,
                        span: Span {
                            start: offset + pos,
                            end: offset + pos + candidate.len,
                        },
                        exact_case: candidate.exact_case,
                    });
                }
                Step::Unmapped { pos, len } => {
                    renderer.push_raw(&word[pos..pos + len]);
                    unmapped.push(Span {
                        start: offset + pos,
                        end: offset + pos + len,
                    });
                }
            }
        }

        let output = renderer.finish();
        debug!(output = output.as_str(), rules = matched_rules.len());
        TransliterationResult {
            source_token: word.to_string(),
            output,
            matched_rules,
            unmapped,
        }
    }
}

/// Transliterate one word with the global grapheme table and settings.
pub fn transliterate_word(word: &str) -> String {
    let table = GraphemeTable::global();
    WordTransliterator::new(&table, &crate::settings::settings().transliterator)
        .transliterate(word)
        .output
}
