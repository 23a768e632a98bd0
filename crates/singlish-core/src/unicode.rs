//! Character-level Unicode classification for Sinhala text.

/// Sinhala virama (hal kirima). Kills the inherent vowel of a consonant.
pub const HAL_KIRIMA: char = '\u{0DCA}';

/// Zero-width joiner, used between hal kirima and ර / ය to request the
/// rakaransaya / yansaya conjunct forms.
pub const ZWJ: char = '\u{200D}';

/// Check the Sinhala block (U+0D80..U+0DFF).
pub fn is_sinhala(c: char) -> bool {
    ('\u{0D80}'..='\u{0DFF}').contains(&c)
}

/// Independent vowels අ..ඖ. The block has unassigned holes (U+0D97..U+0D99)
/// that never appear in engine output, so a range check is enough.
pub fn is_sinhala_vowel(c: char) -> bool {
    ('\u{0D85}'..='\u{0D96}').contains(&c)
}

pub fn is_sinhala_consonant(c: char) -> bool {
    ('\u{0D9A}'..='\u{0DC6}').contains(&c)
}

/// Dependent vowel signs (pili), including the two-part signs.
pub fn is_vowel_sign(c: char) -> bool {
    ('\u{0DCF}'..='\u{0DDF}').contains(&c) || c == '\u{0DF2}' || c == '\u{0DF3}'
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// True if `s` is a run of Latin letters, allowing apostrophes between letters.
pub fn is_latin_word(s: &str) -> bool {
    let mut prev_letter = false;
    let mut any = false;
    for c in s.chars() {
        if is_latin(c) {
            prev_letter = true;
            any = true;
        } else if c == '\'' && prev_letter {
            prev_letter = false;
        } else {
            return false;
        }
    }
    any && prev_letter
}

/// Punctuation that ends a sentence. Used by the assembler to decide whether
/// a line already carries terminal punctuation.
pub fn is_terminal_punctuation(c: char) -> bool {
    matches!(c, '.' | '?' | '!' | '\u{0DF4}')
}
