//! Hot-swappable engine for long-lived hosts.
//!
//! Readers clone the current `Arc<Engine>` and convert without holding the
//! lock. A reload builds the new engine before taking the write lock.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::classifier::Lexicon;
use crate::engine::{Engine, EngineError};
use crate::graphemes::GraphemeTable;
use crate::settings::parse_settings_toml;

/// An engine paired with the version it was published under.
#[derive(Clone)]
pub struct Snapshot {
    pub version: u64,
    pub engine: Arc<Engine>,
}

pub struct SharedEngine {
    current: RwLock<Snapshot>,
}

impl SharedEngine {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            current: RwLock::new(Snapshot { version: 1, engine }),
        }
    }

    /// Shared engine starting from the global tables.
    pub fn from_global() -> Self {
        Self::new(Engine::global())
    }

    pub fn snapshot(&self) -> Snapshot {
        // The guarded value is replaced whole, so a poisoned lock still
        // holds a consistent snapshot.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version
    }

    pub fn transliterate(&self, buffer: &str) -> String {
        self.snapshot().engine.transliterate(buffer)
    }

    /// Publish `engine`, returning the new version.
    pub fn replace(&self, engine: Arc<Engine>) -> u64 {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        current.version += 1;
        current.engine = engine;
        debug!(version = current.version, "engine replaced");
        current.version
    }

    /// Rebuild from TOML documents and publish. `None` keeps the current
    /// component. On error the current engine stays in place.
    pub fn reload(
        &self,
        graphemes: Option<&str>,
        lexicon: Option<&str>,
        settings: Option<&str>,
    ) -> Result<u64, EngineError> {
        let base = self.snapshot().engine;
        let graphemes = match graphemes {
            Some(s) => Arc::new(GraphemeTable::from_toml(s)?),
            None => base.graphemes().clone(),
        };
        let lexicon = match lexicon {
            Some(s) => Arc::new(Lexicon::from_toml(s)?),
            None => base.lexicon().clone(),
        };
        let settings = match settings {
            Some(s) => Arc::new(parse_settings_toml(s)?),
            None => base.settings().clone(),
        };
        let next = Engine::new(graphemes, lexicon, settings);
        Ok(self.replace(Arc::new(next)))
    }
}
