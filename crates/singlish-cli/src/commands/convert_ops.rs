use std::io::{self, Read};

use singlish_core::{format_text, Engine};

/// Convert `text`, or all of stdin when no text is given. Stdin is
/// converted as one buffer so line breaks survive unchanged.
pub fn convert_cmd(engine: &Engine, text: Option<&str>) {
    match text {
        Some(text) => println!("{}", engine.transliterate(text)),
        None => {
            let mut buffer = String::new();
            die!(io::stdin().read_to_string(&mut buffer), "Error reading stdin: {}");
            print!("{}", engine.transliterate(&buffer));
        }
    }
}

pub fn explain_cmd(engine: &Engine, text: &str, json: bool) {
    let result = engine.explain(text);
    if json {
        let out = die!(serde_json::to_string_pretty(&result), "Error: {}");
        println!("{out}");
    } else {
        print!("{}", format_text(&result));
    }
}
