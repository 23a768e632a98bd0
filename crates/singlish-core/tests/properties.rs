//! Property-based tests over generated buffers.

use proptest::prelude::*;

use singlish_core::classifier::Lexicon;
use singlish_core::graphemes::GraphemeTable;
use singlish_core::settings::settings;
use singlish_core::tokenizer::tokenize;
use singlish_core::transliterator::WordTransliterator;
use singlish_core::transliterate;
use singlish_core::unicode::{
    is_sinhala, is_sinhala_consonant, is_sinhala_vowel, is_vowel_sign, HAL_KIRIMA, ZWJ,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Letters that every default-table context can map.
fn arb_mapped_word() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => prop::sample::select(vec!['a', 'e', 'i', 'o', 'u']),
            2 => prop::sample::select(vec![
                'k', 'g', 't', 'd', 'n', 'p', 'b', 'm', 'y', 'r', 'l', 'v', 'w', 's', 'h',
                'c', 'j', 'f', 'x',
            ]),
            1 => prop::sample::select(vec!['N', 'L', 'D', 'H', 'B', 'G', 'T', 'S', 'A']),
        ],
        1..12,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn arb_singlish_sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            prop_oneof![
                8 => arb_mapped_word(),
                1 => "[a-zA-Z']{1,8}",
                1 => "[0-9]{1,3}(\\.[0-9]{2})?",
                1 => prop::sample::select(vec!["Rs.950", "ID", "facebook", "9.00 am", "sinhala"])
                    .prop_map(str::to_string),
            ],
            "[ \t]{1,4}",
        ),
        1..8,
    )
    .prop_map(|words| {
        let mut out = String::new();
        for (i, (word, sep)) in words.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            out.push_str(word);
        }
        out
    })
}

/// Tokens the classifier always passes through unchanged.
fn arb_pass_through_token() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Rs.950", "9.00", "1,000", "facebook", "ID", "telephone", "#"])
        .prop_map(str::to_string)
}

/// Lowercase mapped word that the lexicon does not keep as English.
fn arb_converted_word() -> impl Strategy<Value = String> {
    arb_mapped_word()
        .prop_map(|w| w.to_ascii_lowercase())
        .prop_filter("lexicon pass-through word", |w| !Lexicon::global().is_passthrough(w))
}

fn arb_whitespace() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tokenization_round_trips(input in any::<String>()) {
        let rebuilt: String = tokenize(&input).iter().map(|t| t.raw).collect();
        prop_assert_eq!(rebuilt, input);
    }

    #[test]
    fn spans_are_contiguous(input in any::<String>()) {
        let mut at = 0;
        for t in tokenize(&input) {
            prop_assert_eq!(t.span.start, at);
            prop_assert!(t.span.end > t.span.start);
            at = t.span.end;
        }
        prop_assert_eq!(at, input.len());
    }

    #[test]
    fn transliterate_is_total(input in any::<String>()) {
        let _ = transliterate(&input);
    }

    #[test]
    fn edge_whitespace_is_invariant(
        lead in arb_whitespace(),
        body in arb_singlish_sentence(),
        trail in arb_whitespace(),
    ) {
        let wrapped = format!("{lead}{body}{trail}");
        prop_assert_eq!(
            transliterate(&wrapped),
            format!("{lead}{}{trail}", transliterate(&body))
        );
    }

    #[test]
    fn whitespace_between_pass_through_tokens_is_kept(
        lead in arb_converted_word(),
        first in arb_pass_through_token(),
        sep in "[ \t\u{00a0}]{1,4}",
        second in arb_pass_through_token(),
    ) {
        let segment = format!("{first}{sep}{second}");
        let out = transliterate(&format!("{lead} {segment}"));
        prop_assert!(out.ends_with(&segment), "{:?}", out);
    }

    #[test]
    fn interior_runs_next_to_singlish_collapse(
        word in arb_converted_word(),
        sep in "[ \t]{2,4}",
        other in prop_oneof![arb_converted_word(), arb_pass_through_token()],
    ) {
        let out = transliterate(&format!("{word}{sep}{other}"));
        let spaces: Vec<char> = out.chars().filter(|c| c.is_whitespace()).collect();
        prop_assert_eq!(spaces, vec![' '], "{:?}", out);
    }

    #[test]
    fn reconverting_is_stable(body in arb_singlish_sentence()) {
        let once = transliterate(&body);
        prop_assert_eq!(transliterate(&once), once);
    }

    #[test]
    fn prefixes_are_non_empty(body in arb_singlish_sentence()) {
        for (i, _) in body.char_indices().skip(1) {
            let prefix = &body[..i];
            if prefix.trim().is_empty() {
                continue;
            }
            prop_assert!(!transliterate(prefix).trim().is_empty(), "prefix {:?}", prefix);
        }
    }

    #[test]
    fn mapped_words_render_well_formed_sinhala(word in arb_mapped_word()) {
        let table = GraphemeTable::global();
        let result = WordTransliterator::new(&table, &settings().transliterator).transliterate(&word);
        prop_assert!(result.is_complete());

        let chars: Vec<char> = result.output.chars().collect();
        for (i, &c) in chars.iter().enumerate() {
            prop_assert!(is_sinhala(c) || c == ZWJ, "{:?} -> {:?}", word, result.output);
            if is_vowel_sign(c) || c == HAL_KIRIMA {
                let prev = if i > 0 { Some(chars[i - 1]) } else { None };
                prop_assert!(
                    prev.is_some_and(is_sinhala_consonant),
                    "{:?} -> {:?}: sign at {}",
                    word,
                    result.output,
                    i
                );
            }
        }

        let first = word.as_bytes()[0].to_ascii_lowercase();
        if matches!(first, b'a' | b'e' | b'i' | b'o' | b'u') {
            prop_assert!(is_sinhala_vowel(chars[0]), "{:?} -> {:?}", word, result.output);
        }
    }
}
