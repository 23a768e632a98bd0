//! Sentence assembly: spacing normalization and question-form completion
//! over already converted tokens.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::classifier::Classification;
use crate::settings::AssemblerSettings;
use crate::tokenizer::{Token, TokenKind};
use crate::transliterator::WordTransliterator;
use crate::unicode::is_terminal_punctuation;

/// A token with its classification and converted text.
#[derive(Debug, Clone)]
pub struct Piece<'a> {
    pub token: Token<'a>,
    pub classification: Classification,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assembly {
    pub output: String,
    pub questions_completed: usize,
    pub collapsed_spaces: usize,
}

/// Running state for the current line.
#[derive(Debug, Default)]
pub struct SentenceContext {
    /// Index of the last non-whitespace piece.
    pub last_content: Option<usize>,
    pub words: usize,
    /// The last non-whitespace piece is terminal punctuation.
    pub terminated: bool,
}

impl SentenceContext {
    fn observe(&mut self, index: usize, piece: &Piece<'_>) {
        self.last_content = Some(index);
        if piece.token.is_word() {
            self.words += 1;
        }
        self.terminated = piece.token.kind == TokenKind::Punctuation
            && piece
                .token
                .raw
                .chars()
                .last()
                .is_some_and(is_terminal_punctuation);
    }
}

pub struct Assembler<'a> {
    transliterator: &'a WordTransliterator<'a>,
    settings: &'a AssemblerSettings,
}

impl<'a> Assembler<'a> {
    pub fn new(transliterator: &'a WordTransliterator<'a>, settings: &'a AssemblerSettings) -> Self {
        Self {
            transliterator,
            settings,
        }
    }

    /// Rewrite piece outputs in place and concatenate them.
    pub fn assemble(&self, pieces: &mut [Piece<'_>]) -> Assembly {
        let _span = debug_span!("assemble", pieces = pieces.len()).entered();

        let mut collapsed_spaces = 0;
        if self.settings.collapse_interior_spaces {
            for i in 0..pieces.len() {
                if is_collapsible_space(pieces, i) {
                    pieces[i].output = " ".to_string();
                    collapsed_spaces += 1;
                }
            }
        }

        let mut questions_completed = 0;
        let mut ctx = SentenceContext::default();
        for i in 0..pieces.len() {
            match pieces[i].token.kind {
                TokenKind::LineBreak => {
                    if self.complete_question(pieces, &ctx) {
                        questions_completed += 1;
                    }
                    ctx = SentenceContext::default();
                }
                TokenKind::Whitespace => {}
                _ => ctx.observe(i, &pieces[i]),
            }
        }
        if self.complete_question(pieces, &ctx) {
            questions_completed += 1;
        }

        let output: String = pieces.iter().map(|p| p.output.as_str()).collect();
        debug!(collapsed_spaces, questions_completed);
        Assembly {
            output,
            questions_completed,
            collapsed_spaces,
        }
    }

    /// Append the question mark to a line that ends in an interrogative
    /// word with no punctuation after it.
    fn complete_question(&self, pieces: &mut [Piece<'_>], ctx: &SentenceContext) -> bool {
        if ctx.terminated {
            return false;
        }
        let Some(index) = ctx.last_content else {
            return false;
        };
        let piece = &pieces[index];
        if piece.classification != Classification::Transliterate {
            return false;
        }
        let raw = piece.token.raw;
        let Some(suffix) = self.settings.question_suffix_for(raw) else {
            return false;
        };

        let stem = &raw[..raw.len() - suffix.ending.len()];
        let rewritten = format!("{stem}{}", suffix.rewrite());
        let mut output = self.transliterator.transliterate(&rewritten).output;
        output.push_str(&self.settings.question_mark);
        debug!(word = raw, rewritten = rewritten.as_str(), "question completed");
        pieces[index].output = output;
        true
    }
}

/// A multi-character whitespace run with content on both sides within the
/// same line, next to at least one converted word. Runs between two
/// pass-through tokens are kept as typed.
fn is_collapsible_space(pieces: &[Piece<'_>], i: usize) -> bool {
    let piece = &pieces[i];
    if piece.token.kind != TokenKind::Whitespace || i == 0 || i + 1 >= pieces.len() {
        return false;
    }
    if piece.token.raw.chars().count() < 2 {
        return false;
    }
    let (before, after) = (&pieces[i - 1], &pieces[i + 1]);
    if before.token.is_space() || after.token.is_space() {
        return false;
    }
    is_converted(before) || is_converted(after)
}

fn is_converted(piece: &Piece<'_>) -> bool {
    !matches!(piece.classification, Classification::PassThrough { .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::PassThroughReason;
    use crate::graphemes::GraphemeTable;
    use crate::settings::{parse_settings_toml, settings, DEFAULT_SETTINGS_TOML};
    use crate::tokenizer::tokenize;

    /// Words are transliterated, everything else copied.
    fn pieces(input: &str) -> Vec<Piece<'_>> {
        let table = GraphemeTable::global();
        let tr = WordTransliterator::new(&table, &settings().transliterator);
        tokenize(input)
            .into_iter()
            .map(|token| {
                let (classification, output) = if token.kind == TokenKind::SinglishWord {
                    (Classification::Transliterate, tr.transliterate(token.raw).output)
                } else {
                    let reason = if token.is_space() {
                        PassThroughReason::Space
                    } else {
                        PassThroughReason::Symbol
                    };
                    (Classification::PassThrough { reason }, token.raw.to_string())
                };
                Piece {
                    token,
                    classification,
                    output,
                }
            })
            .collect()
    }

    fn assemble_with(input: &str, settings: &AssemblerSettings) -> Assembly {
        let table = GraphemeTable::global();
        let tr = WordTransliterator::new(&table, &crate::settings::settings().transliterator);
        let mut ps = pieces(input);
        Assembler::new(&tr, settings).assemble(&mut ps)
    }

    fn assemble(input: &str) -> Assembly {
        assemble_with(input, &settings().assembler)
    }

    #[test]
    fn test_interior_spaces_collapse() {
        let a = assemble("dhaen   oyaata     kohomadha?");
        assert_eq!(a.output, "දැන් ඔයාට කොහොමද?");
        assert_eq!(a.collapsed_spaces, 2);
        assert_eq!(a.questions_completed, 0);
    }

    #[test]
    fn test_edge_spaces_kept() {
        assert_eq!(assemble("  ").output, "  ");
        assert_eq!(assemble("  mama  ").output, "  මම  ");
    }

    #[test]
    fn test_space_next_to_line_break_kept() {
        let a = assemble("ivvaa \n kanavaa");
        assert_eq!(a.output, "ඉව්වා \n කනවා");
        assert_eq!(a.collapsed_spaces, 0);
    }

    #[test]
    fn test_collapse_disabled() {
        let mut s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap().assembler;
        s.collapse_interior_spaces = false;
        assert_eq!(assemble_with("mama   adha", &s).output, "මම   අද");
    }

    #[test]
    fn test_runs_between_pass_through_tokens_kept() {
        let a = assemble("Rs.950   9.00 !!  #");
        assert_eq!(a.output, "Rs.950   9.00 !!  #");
        assert_eq!(a.collapsed_spaces, 0);
    }

    #[test]
    fn test_run_next_to_converted_word_collapses() {
        let a = assemble("mama   Rs.950\t\tadha");
        assert_eq!(a.output, "මම Rs.950 අද");
        assert_eq!(a.collapsed_spaces, 2);
    }

    #[test]
    fn test_single_whitespace_char_kept() {
        assert_eq!(assemble("mama\tadha").output, "මම\tඅද");
        assert_eq!(assemble("mama\u{00a0}adha").output, "මම\u{00a0}අද");
    }

    #[test]
    fn test_question_completion() {
        let a = assemble("adha yanavadha");
        assert_eq!(a.output, "අද යනවාද?");
        assert_eq!(a.questions_completed, 1);
    }

    #[test]
    fn test_question_completion_keeps_trailing_space() {
        assert_eq!(assemble("adha yanavadha ").output, "අද යනවාද? ");
    }

    #[test]
    fn test_no_completion_when_punctuated() {
        let a = assemble("adha oyaalata vahinavaadha?");
        assert_eq!(a.output, "අද ඔයාලට වහිනවාද?");
        assert_eq!(a.questions_completed, 0);
        assert_eq!(assemble("yanavadha.").output, "යනවද.");
    }

    #[test]
    fn test_no_completion_mid_line() {
        assert_eq!(assemble("yanavadha mama").output, "යනවද මම");
    }

    #[test]
    fn test_completion_per_line() {
        let a = assemble("enavaadha\nmama needha");
        assert_eq!(a.output, "එනවාද?\nමම නේද?");
        assert_eq!(a.questions_completed, 2);
    }

    #[test]
    fn test_sentence_context_tracks_terminal_punctuation() {
        let ps = pieces("mama!");
        let mut ctx = SentenceContext::default();
        ctx.observe(0, &ps[0]);
        assert!(!ctx.terminated);
        ctx.observe(1, &ps[1]);
        assert!(ctx.terminated);
        assert_eq!(ctx.words, 1);
        assert_eq!(ctx.last_content, Some(1));
    }
}
