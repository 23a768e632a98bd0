fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_toml(
        "src/graphemes/default_graphemes.toml",
        include_str!("src/graphemes/default_graphemes.toml"),
    );
    validate_toml(
        "src/classifier/default_lexicon.toml",
        include_str!("src/classifier/default_lexicon.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}
