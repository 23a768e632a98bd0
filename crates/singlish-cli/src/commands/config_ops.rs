use std::fs;

use singlish_core::classifier::Lexicon;
use singlish_core::graphemes::parse_grapheme_toml;

pub fn graphemes_export() {
    print!("{}", singlish_core::graphemes::default_toml());
}

pub fn graphemes_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let data = die!(parse_grapheme_toml(&content), "Error: {}");
    let count = |kind: &str| data.rules.iter().filter(|r| r.kind.name() == kind).count();
    println!(
        "OK: version {}, {} rules ({} vowels, {} consonants, {} medials, {} modifiers)",
        data.version,
        data.rules.len(),
        count("vowel"),
        count("consonant"),
        count("medial"),
        count("modifier"),
    );
}

pub fn lexicon_export() {
    print!("{}", singlish_core::classifier::default_toml());
}

pub fn lexicon_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let lexicon = die!(Lexicon::from_toml(&content), "Error: {}");
    println!(
        "OK: version {}, {} words",
        lexicon.version(),
        lexicon.len()
    );
}

pub fn settings_export() {
    print!("{}", singlish_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        singlish_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: transliterator.max_backtrack_steps={}, classifier.acronym_min_len={}, assembler.question_suffixes={}",
        s.transliterator.max_backtrack_steps,
        s.classifier.acronym_min_len,
        s.assembler.question_suffixes.len()
    );
}
