//! Singlish to Sinhala transliteration.
//!
//! `transliterate(buffer)` converts a whole input buffer with the global
//! tables. Hosts that need custom tables build an [`Engine`] or keep a
//! [`SharedEngine`] for runtime reloads.

pub mod assembler;
pub mod classifier;
pub mod engine;
pub mod explain;
pub mod graphemes;
pub mod settings;
pub mod snapshot;
pub mod tokenizer;
pub mod transliterator;
pub mod unicode;

pub use engine::{transliterate, Engine, EngineError};
pub use explain::{format_text, ExplainResult};
pub use snapshot::{SharedEngine, Snapshot};
