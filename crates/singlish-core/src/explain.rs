use serde::Serialize;

use crate::classifier::Classification;
use crate::engine::Engine;
use crate::tokenizer::{Span, TokenKind};
use crate::transliterator::AppliedRule;

/// Full diagnostic result for one buffer.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub input: String,
    pub output: String,
    pub grapheme_version: u32,
    pub lexicon_version: u32,
    pub tokens: Vec<ExplainToken>,
    pub questions_completed: usize,
    pub collapsed_spaces: usize,
}

/// One token with its classification and final output.
#[derive(Debug, Serialize)]
pub struct ExplainToken {
    pub kind: TokenKind,
    pub raw: String,
    pub span: Span,
    pub classification: Classification,
    pub output: String,
    /// Grapheme rules applied, for transliterated text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ExplainRule>,
    /// Characters no rule could map.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped: Vec<Span>,
}

#[derive(Debug, Serialize)]
pub struct ExplainRule {
    pub pattern: String,
    pub matched: String,
    pub kind: &'static str,
    pub output: String,
    pub span: Span,
    pub exact_case: bool,
}

pub(crate) fn explain(engine: &Engine, buffer: &str) -> ExplainResult {
    let conversion = engine.convert(buffer);
    let table = engine.graphemes();

    let tokens = conversion
        .pieces
        .iter()
        .zip(&conversion.details)
        .map(|(piece, detail)| {
            let (rules, unmapped) = match detail {
                Some(result) => (
                    result
                        .matched_rules
                        .iter()
                        .map(|applied: &AppliedRule| {
                            let rule = table.rule(applied.rule);
                            ExplainRule {
                                pattern: rule.pattern.clone(),
                                matched: buffer[applied.span.start..applied.span.end].to_string(),
                                kind: rule.kind.name(),
                                output: rule.output.clone(),
                                span: applied.span,
                                exact_case: applied.exact_case,
                            }
                        })
                        .collect(),
                    result.unmapped.clone(),
                ),
                None => (Vec::new(), Vec::new()),
            };
            ExplainToken {
                kind: piece.token.kind,
                raw: piece.token.raw.to_string(),
                span: piece.token.span,
                classification: piece.classification.clone(),
                output: piece.output.clone(),
                rules,
                unmapped,
            }
        })
        .collect();

    ExplainResult {
        input: buffer.to_string(),
        output: conversion.assembly.output,
        grapheme_version: table.version(),
        lexicon_version: engine.lexicon().version(),
        tokens,
        questions_completed: conversion.assembly.questions_completed,
        collapsed_spaces: conversion.assembly.collapsed_spaces,
    }
}

fn classification_label(c: &Classification) -> String {
    match c {
        Classification::Transliterate => "transliterate".to_string(),
        Classification::PassThrough { reason } => format!("pass({})", reason_name(*reason)),
        Classification::Override { .. } => "override".to_string(),
        Classification::Mixed { literal_len } => format!("mixed({literal_len})"),
    }
}

fn reason_name(reason: crate::classifier::PassThroughReason) -> &'static str {
    use crate::classifier::PassThroughReason::*;
    match reason {
        Foreign => "foreign",
        Number => "number",
        Symbol => "symbol",
        Space => "space",
        Lexicon => "lexicon",
        Acronym => "acronym",
        Time => "time",
    }
}

/// Left-align `s` to `width` display columns.
fn pad(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    let w = UnicodeWidthStr::width(s);
    if w < width {
        format!("{s}{}", " ".repeat(width - w))
    } else {
        s.to_string()
    }
}

/// Format an ExplainResult as human-readable text. Whitespace tokens are
/// listed only when they changed.
pub fn format_text(result: &ExplainResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Explain {:?} ({} tokens, graphemes v{}, lexicon v{}) ===\n",
        result.input,
        result.tokens.len(),
        result.grapheme_version,
        result.lexicon_version,
    ));

    for t in &result.tokens {
        let is_space = matches!(t.kind, TokenKind::Whitespace | TokenKind::LineBreak);
        if is_space && t.output == t.raw {
            continue;
        }
        let span = format!("[{},{}]", t.span.start, t.span.end);
        out.push_str(&format!(
            "  {} {} {} -> {}\n",
            pad(&span, 9),
            pad(&format!("{:?}", t.raw), 16),
            pad(&classification_label(&t.classification), 16),
            t.output,
        ));
        for r in &t.rules {
            let case = if r.exact_case { "" } else { " (folded)" };
            out.push_str(&format!(
                "      {} {} {}{}\n",
                pad(&r.matched, 4),
                pad(&r.kind, 10),
                r.output,
                case,
            ));
        }
        for u in &t.unmapped {
            out.push_str(&format!(
                "      {} unmapped\n",
                pad(&result.input[u.start..u.end], 4)
            ));
        }
    }

    out.push_str(&format!(
        "\noutput: {}\nquestions completed: {}, spaces collapsed: {}\n",
        result.output, result.questions_completed, result.collapsed_spaces,
    ));
    out
}
