//! Buffer-level facade: tokenize, classify, transliterate, assemble.

use std::sync::{Arc, OnceLock};

use tracing::{debug, debug_span};

use crate::assembler::{Assembler, Assembly, Piece};
use crate::classifier::{Classification, Classifier, Lexicon, LexiconError};
use crate::explain::{self, ExplainResult};
use crate::graphemes::{GraphemeConfigError, GraphemeTable};
use crate::settings::{self, parse_settings_toml, Settings, SettingsError};
use crate::tokenizer::tokenize;
use crate::transliterator::{TransliterationResult, WordTransliterator};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("grapheme table: {0}")]
    Graphemes(#[from] GraphemeConfigError),
    #[error("lexicon: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Immutable conversion engine. Cheap to clone; tables are shared.
#[derive(Debug, Clone)]
pub struct Engine {
    graphemes: Arc<GraphemeTable>,
    lexicon: Arc<Lexicon>,
    settings: Arc<Settings>,
}

/// Intermediate state of one conversion, kept for diagnostics.
pub(crate) struct Conversion<'b> {
    pub pieces: Vec<Piece<'b>>,
    /// Word-level detail for transliterated pieces, indexed like `pieces`.
    pub details: Vec<Option<TransliterationResult>>,
    pub assembly: Assembly,
}

impl Engine {
    pub fn new(graphemes: Arc<GraphemeTable>, lexicon: Arc<Lexicon>, settings: Arc<Settings>) -> Self {
        Self {
            graphemes,
            lexicon,
            settings,
        }
    }

    /// Engine over the global tables and settings.
    pub fn global() -> Arc<Engine> {
        static INSTANCE: OnceLock<Arc<Engine>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Arc::new(Engine::new(
                    GraphemeTable::global(),
                    Lexicon::global(),
                    Arc::new(settings::settings().clone()),
                ))
            })
            .clone()
    }

    /// Build an engine from TOML documents. `None` takes the global value.
    pub fn from_toml(
        graphemes: Option<&str>,
        lexicon: Option<&str>,
        settings: Option<&str>,
    ) -> Result<Self, EngineError> {
        let graphemes = match graphemes {
            Some(s) => Arc::new(GraphemeTable::from_toml(s)?),
            None => GraphemeTable::global(),
        };
        let lexicon = match lexicon {
            Some(s) => Arc::new(Lexicon::from_toml(s)?),
            None => Lexicon::global(),
        };
        let settings = match settings {
            Some(s) => Arc::new(parse_settings_toml(s)?),
            None => Arc::new(settings::settings().clone()),
        };
        Ok(Engine::new(graphemes, lexicon, settings))
    }

    pub fn graphemes(&self) -> &Arc<GraphemeTable> {
        &self.graphemes
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Convert a full buffer. Never fails.
    pub fn transliterate(&self, buffer: &str) -> String {
        self.convert(buffer).assembly.output
    }

    /// Convert a buffer and report every decision made on the way.
    pub fn explain(&self, buffer: &str) -> ExplainResult {
        explain::explain(self, buffer)
    }

    pub(crate) fn convert<'b>(&self, buffer: &'b str) -> Conversion<'b> {
        let _span = debug_span!("transliterate", len = buffer.len()).entered();

        let tokens = tokenize(buffer);
        let classifier = Classifier::new(&self.lexicon, &self.settings.classifier);
        let classes = classifier.classify_all(&tokens);
        let words = WordTransliterator::new(&self.graphemes, &self.settings.transliterator);

        let mut pieces = Vec::with_capacity(tokens.len());
        let mut details = Vec::with_capacity(tokens.len());
        for (token, classification) in tokens.into_iter().zip(classes) {
            let (output, detail) = match &classification {
                Classification::Transliterate => {
                    let result = words.transliterate_token(&token);
                    (result.output.clone(), Some(result))
                }
                Classification::Mixed { literal_len } => {
                    let (literal, tail) = token.raw.split_at(*literal_len);
                    let result = words.transliterate_at(tail, token.span.start + literal_len);
                    (format!("{literal}{}", result.output), Some(result))
                }
                Classification::Override { output } => (output.clone(), None),
                Classification::PassThrough { .. } => (token.raw.to_string(), None),
            };
            pieces.push(Piece {
                token,
                classification,
                output,
            });
            details.push(detail);
        }

        let assembly = Assembler::new(&words, &self.settings.assembler).assemble(&mut pieces);
        debug!(tokens = pieces.len(), output_len = assembly.output.len());
        Conversion {
            pieces,
            details,
            assembly,
        }
    }
}

/// Convert a buffer with the global engine.
pub fn transliterate(buffer: &str) -> String {
    Engine::global().transliterate(buffer)
}
