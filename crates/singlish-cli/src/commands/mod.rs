use std::fs;
use std::path::PathBuf;

use singlish_core::{Engine, EngineError};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod accuracy_ops;
pub mod config_ops;
pub mod convert_ops;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Optional replacement documents given on the command line.
#[derive(Debug, Default, Clone)]
pub struct EngineOptions {
    pub graphemes: Option<PathBuf>,
    pub lexicon: Option<PathBuf>,
    pub settings: Option<PathBuf>,
}

fn read_optional(path: Option<&PathBuf>) -> Result<Option<String>, LoadError> {
    path.map(|p| {
        fs::read_to_string(p).map_err(|source| LoadError::Io {
            path: p.clone(),
            source,
        })
    })
    .transpose()
}

/// Build the engine, substituting any documents named in `opts`.
pub fn load_engine(opts: &EngineOptions) -> Result<Engine, LoadError> {
    let graphemes = read_optional(opts.graphemes.as_ref())?;
    let lexicon = read_optional(opts.lexicon.as_ref())?;
    let settings = read_optional(opts.settings.as_ref())?;
    Ok(Engine::from_toml(
        graphemes.as_deref(),
        lexicon.as_deref(),
        settings.as_deref(),
    )?)
}
