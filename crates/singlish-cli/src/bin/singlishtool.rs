use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use singlish_cli::commands::{
    accuracy_ops, config_ops, convert_ops, load_engine, EngineOptions,
};

#[derive(Parser)]
#[command(name = "singlishtool", about = "Singlish to Sinhala conversion tool")]
struct Cli {
    #[command(flatten)]
    tables: TableArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct TableArgs {
    /// Grapheme table TOML replacing the built-in one
    #[arg(long, global = true)]
    graphemes: Option<PathBuf>,
    /// Lexicon TOML replacing the built-in one
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,
    /// Settings TOML replacing the built-in one
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert text (reads stdin when TEXT is omitted)
    Convert {
        /// Singlish text
        text: Option<String>,
    },
    /// Show tokens, classifications and grapheme rules for a conversion
    Explain {
        /// Singlish text
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run conversion accuracy tests from a structured TOML corpus
    Accuracy {
        /// Path to the accuracy corpus TOML file
        corpus_file: String,
        /// Filter by category (only run cases in this category)
        #[arg(long)]
        category: Option<String>,
        /// Filter by tag (only run cases with this tag)
        #[arg(long)]
        tag: Option<String>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the default grapheme table TOML to stdout
    GraphemesExport,
    /// Validate a grapheme table TOML file
    GraphemesValidate {
        /// TOML file to validate
        file: String,
    },
    /// Print the default lexicon TOML to stdout
    LexiconExport,
    /// Validate a lexicon TOML file
    LexiconValidate {
        /// TOML file to validate
        file: String,
    },
    /// Print the default settings TOML to stdout
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// TOML file to validate
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let opts = EngineOptions {
        graphemes: cli.tables.graphemes,
        lexicon: cli.tables.lexicon,
        settings: cli.tables.settings,
    };
    let engine = || {
        load_engine(&opts).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        })
    };

    match cli.command {
        Command::Convert { text } => convert_ops::convert_cmd(&engine(), text.as_deref()),
        Command::Explain { text, json } => convert_ops::explain_cmd(&engine(), &text, json),
        Command::Accuracy {
            corpus_file,
            category,
            tag,
            verbose,
            json,
        } => accuracy_ops::accuracy_cmd(
            &engine(),
            &corpus_file,
            category.as_deref(),
            tag.as_deref(),
            verbose,
            json,
        ),
        Command::GraphemesExport => config_ops::graphemes_export(),
        Command::GraphemesValidate { file } => config_ops::graphemes_validate(&file),
        Command::LexiconExport => config_ops::lexicon_export(),
        Command::LexiconValidate { file } => config_ops::lexicon_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
