//! Lossless tokenizer: concatenating every token's `raw` reproduces the input.

use serde::Serialize;

use crate::unicode::{is_latin, is_sinhala, ZWJ};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    SinglishWord,
    ForeignWord,
    Number,
    Punctuation,
    Whitespace,
    LineBreak,
}

/// Byte offsets into the tokenized buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub raw: &'a str,
    pub span: Span,
}

impl Token<'_> {
    pub fn is_space(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::LineBreak)
    }

    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::SinglishWord | TokenKind::ForeignWord)
    }
}

struct Sink<'a> {
    buffer: &'a str,
    tokens: Vec<Token<'a>>,
}

impl<'a> Sink<'a> {
    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        if start < end {
            self.tokens.push(Token {
                kind,
                raw: &self.buffer[start..end],
                span: Span { start, end },
            });
        }
    }

    /// Punctuation, one token per run of identical characters ("..", "!!").
    fn push_punctuation(&mut self, start: usize, end: usize) {
        let text = &self.buffer[start..end];
        let mut run_start = start;
        let mut run_char: Option<char> = None;
        for (off, c) in text.char_indices() {
            let at = start + off;
            match run_char {
                Some(rc) if rc == c => {}
                Some(_) => {
                    self.push(TokenKind::Punctuation, run_start, at);
                    run_start = at;
                    run_char = Some(c);
                }
                None => run_char = Some(c),
            }
        }
        self.push(TokenKind::Punctuation, run_start, end);
    }
}

/// Split `buffer` into tokens. Total over all strings.
pub fn tokenize(buffer: &str) -> Vec<Token<'_>> {
    let mut sink = Sink {
        buffer,
        tokens: Vec::new(),
    };
    let bytes = buffer.as_bytes();
    let mut i = 0;

    while i < buffer.len() {
        let c = buffer[i..].chars().next().unwrap_or_default();
        if c == '\n' {
            sink.push(TokenKind::LineBreak, i, i + 1);
            i += 1;
        } else if c == '\r' {
            let len = if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
            sink.push(TokenKind::LineBreak, i, i + len);
            i += len;
        } else if c.is_whitespace() {
            let end = scan(buffer, i, |c| c.is_whitespace() && c != '\n' && c != '\r');
            sink.push(TokenKind::Whitespace, i, end);
            i = end;
        } else {
            let end = scan(buffer, i, |c| !c.is_whitespace());
            split_chunk(&mut sink, i, end);
            i = end;
        }
    }

    sink.tokens
}

/// End offset of the run starting at `start` whose chars satisfy `pred`.
fn scan(buffer: &str, start: usize, pred: impl Fn(char) -> bool) -> usize {
    buffer[start..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(off, _)| start + off)
        .unwrap_or(buffer.len())
}

/// Split a whitespace-free chunk into leading punctuation, a core, and
/// trailing punctuation.
fn split_chunk(sink: &mut Sink<'_>, start: usize, end: usize) {
    let chunk = &sink.buffer[start..end];
    let core_start = chunk.char_indices().find(|&(_, c)| is_core_char(c));
    let Some((lead, _)) = core_start else {
        sink.push_punctuation(start, end);
        return;
    };
    let core_end = chunk
        .char_indices()
        .rev()
        .find(|&(_, c)| is_core_char(c))
        .map(|(off, c)| off + c.len_utf8())
        .unwrap_or(chunk.len());

    sink.push_punctuation(start, start + lead);
    split_core(sink, start + lead, start + core_end);
    sink.push_punctuation(start + core_end, end);
}

/// Sinhala hal kirima and ZWJ are not alphanumeric but belong to the word.
fn is_core_char(c: char) -> bool {
    c.is_alphanumeric() || is_sinhala(c) || c == ZWJ
}

fn split_core(sink: &mut Sink<'_>, start: usize, end: usize) {
    let core = &sink.buffer[start..end];

    if core.chars().any(|c| c.is_ascii_digit()) {
        // Numbers keep their separators; anything mixing letters and digits
        // (Rs.950, A12, 10kg) is opaque.
        let numeric = core
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ':'));
        let kind = if numeric {
            TokenKind::Number
        } else {
            TokenKind::ForeignWord
        };
        sink.push(kind, start, end);
        return;
    }

    if !core.is_ascii() {
        sink.push(TokenKind::ForeignWord, start, end);
        return;
    }

    let bytes = core.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if is_latin(bytes[i] as char) {
            let mut j = i + 1;
            while j < bytes.len() {
                let b = bytes[j];
                let inner_apostrophe =
                    b == b'\'' && bytes.get(j + 1).is_some_and(|&n| is_latin(n as char));
                if is_latin(b as char) || inner_apostrophe {
                    j += 1;
                } else {
                    break;
                }
            }
            sink.push(TokenKind::SinglishWord, start + i, start + j);
            i = j;
        } else {
            let mut j = i + 1;
            while j < bytes.len() && !is_latin(bytes[j] as char) {
                j += 1;
            }
            sink.push_punctuation(start + i, start + j);
            i = j;
        }
    }
}
