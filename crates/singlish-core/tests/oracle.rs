//! End-to-end conversions of complete buffers.

use singlish_core::{transliterate, Engine};

const POSITIVE: &[(&str, &str)] = &[
    ("mama adha enavaa", "මම අද එනවා"),
    (
        "mama oyaata kaemathiyi namuth mata epaavenavaa",
        "මම ඔයාට කැමතියි නමුත් මට එපාවෙනවා",
    ),
    ("theruvan Saranayi", "තෙරුවන් සරනයි"),
    ("ooka amathaka karapan", "ඕක අමතක කරපන්"),
    (
        "karuNaakaralaa oya potha mata dhenna puLuvandha?",
        "කරුණාකරලා ඔය පොත මට දෙන්න පුළුවන්ද?",
    ),
    (
        "aeththa vashayenma kiyanavaanam magee thiiraNaya gaena mata kisima pasuthaviimak naehae. mama mee thiiraNaya gaththee godak kalpanaa karalaa. ee gaena vena kaatahari prashnayak thiyenam mata eekata karanna dheyak naee.. mama karannee mata hoDHAyi kiyalaa hithena dhee!",
        "ඇත්ත වශයෙන්ම කියනවානම් මගේ තීරණය ගැන මට කිසිම පසුතවීමක් නැහැ. මම මේ තීරණය ගත්තේ ගොඩක් කල්පනා කරලා. ඒ ගැන වෙන කාටහරි ප්‍රශ්නයක් තියෙනම් මට ඒකට කරන්න දෙයක් නෑ.. මම කරන්නේ මට හොඳයි කියලා හිතෙන දේ!",
    ),
    ("mama kadeeta Rs.950 k Nayayi", "මම කඩේට Rs.950 ක් ණයයි"),
    ("eeka niyamayi, supiriyi machan!", "ඒක නියමයි, සුපිරියි මචන්!"),
    (
        "Oyaala adha enavanam mama kaeema hadhanavaa",
        "ඔයාල අද එනවනම් මම කෑම හදනවා",
    ),
    ("vahaama othanin vaadivenna", "වහාම ඔතනින් වාඩිවෙන්න"),
    ("adha oyaalata vahinavaadha?", "අද ඔයාලට වහිනවාද?"),
    (
        "mama adha mokuthma paadam karannee naehae",
        "මම අද මොකුත්ම පාඩම් කරන්නේ නැහැ",
    ),
    ("mama kadeeta yanavaa", "මම කඩේට යනවා"),
    (
        "ohu adha enne naehae.\n        oyaata dhukayidha?",
        "ඔහු අද එන්නෙ නැහැ.\n        ඔයාට දුකයිද?",
    ),
    (
        "Api kattiya Thailand valata savaariyak yannayi hadhannee",
        "අපි කට්ටිය Thailand වලට සවාරියක් යන්නයි හදන්නේ",
    ),
    (
        "mee oyaa adha maava balanna enavaa needha?",
        "මේ ඔයා අද මාව බලන්න එනවා නේද?",
    ),
    (
        "oyaa mata facebook eken request ekak dhaemmadha?",
        "ඔයා මට facebook එකෙන් request එකක් දැම්මද?",
    ),
    ("hari hari mama thamayi naraka", "හරි හරි මම තමයි නරක"),
    ("  ", "  "),
    (
        "mata adha magee ID eka geenna amathaka unaa",
        "මට අද මගේ ID එක ගේන්න අමතක උනා",
    ),
    (
        "adoo mama kiyana dhee ahapan. ooka dhaen kalpana karaa kiyalaa uBAta vaedakuth naehae. mata vaedakuth naehae. moodayek novii hitapan. dhaen hoDHA ekaa vagee gihilla kaema tikak kaalaa budhiyaaganin. mata aaye kiyanna thiyanna epaa. magen guti kandath epaa",
        "අඩෝ මම කියන දේ අහපන්. ඕක දැන් කල්පන කරා කියලා උඹට වැඩකුත් නැහැ. මට වැඩකුත් නැහැ. මෝඩයෙක් නොවී හිටපන්. දැන් හොඳ එකා වගේ ගිහිල්ල කැම ටිකක් කාලා බුදියාගනින්. මට ආයෙ කියන්න තියන්න එපා. මගෙන් ගුටි කන්ඩත් එපා",
    ),
    (
        "mata adha 9.00 Am panthi patangannavaa",
        "මට අද 9.00 Am පන්ති පටන්ගන්නවා",
    ),
    ("aevith yanna enna", "ඇවිත් යන්න එන්න"),
    (
        "mee telephone eka vaeda karannee naehae",
        "මේ telephone එක වැඩ කරන්නේ නැහැ",
    ),
];

#[test]
fn positive_corpus() {
    let mut failures = Vec::new();
    for &(input, expected) in POSITIVE {
        let actual = transliterate(input);
        if actual != expected {
            failures.push(format!("{input:?}\n  expected {expected:?}\n  actual   {actual:?}"));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn extra_spaces_collapse() {
    assert_eq!(
        transliterate("dhaen   oyaata     kohomadha?"),
        "දැන් ඔයාට කොහොමද?"
    );
}

#[test]
fn foreign_segment_spacing_is_kept() {
    assert_eq!(
        transliterate("mee telephone   request eka"),
        "මේ telephone   request එක"
    );
    assert_eq!(transliterate("Rs.950   9.00"), "Rs.950   9.00");
    assert_eq!(transliterate("mee   telephone"), "මේ telephone");
}

#[test]
fn single_tab_is_kept() {
    assert_eq!(transliterate("mama\tadha"), "මම\tඅද");
}

#[test]
fn whitespace_only_is_unchanged() {
    for input in ["", " ", "  ", "\t", "\n", " \n\t "] {
        assert_eq!(transliterate(input), input);
    }
}

#[test]
fn edge_whitespace_is_preserved() {
    assert_eq!(transliterate("  mama adha  "), "  මම අද  ");
    assert_eq!(transliterate("\tmama\n"), "\tමම\n");
}

#[test]
fn line_break_is_preserved() {
    assert_eq!(
        transliterate("ammaa bath ivvaa \n kanavaanam kiyanna"),
        "අම්මා බත් ඉව්වා \n කනවානම් කියන්න"
    );
}

#[test]
fn question_form_is_completed() {
    assert_eq!(transliterate("adha yanavadha"), "අද යනවාද?");
}

#[test]
fn english_words_pass_through() {
    assert_eq!(
        transliterate("mee telephone eka vaeda karannee naehae"),
        "මේ telephone එක වැඩ කරන්නේ නැහැ"
    );
}

#[test]
fn letter_w_maps_to_va() {
    assert_eq!(
        transliterate("wathura wiidhuruwak dhenna"),
        "වතුර වීදුරුවක් දෙන්න"
    );
}

#[test]
fn common_word_override() {
    assert_eq!(transliterate("Magee jaathiya sinhala"), "මගේ ජාතිය සිංහල");
}

#[test]
fn prefixes_produce_output() {
    let full = "eyaa sindhu kiyanavaa";
    let partial = transliterate("eyaa sindhu ki");
    assert!(!partial.trim().is_empty());
    assert!(partial.starts_with("එයා සින්දු"));
    assert_eq!(transliterate(full), "එයා සින්දු කියනවා");
}

#[test]
fn non_singlish_passes_through() {
    for input in ["Rs.950", "9.00", "මම ගෙදර", "#!?", "A12 10kg"] {
        assert_eq!(transliterate(input), input);
    }
}

#[test]
fn output_is_stable_when_reconverted() {
    for &(input, _) in POSITIVE {
        let once = transliterate(input);
        assert_eq!(transliterate(&once), once, "input {input:?}");
    }
}

#[test]
fn explain_agrees_with_transliterate() {
    let engine = Engine::global();
    for &(input, expected) in POSITIVE {
        assert_eq!(engine.explain(input).output, expected);
    }
}
