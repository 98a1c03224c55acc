use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: usize = 4000;
pub const DEFAULT_CONTEXT_RADIUS: usize = 200;
pub const DEFAULT_PEEK_WINDOW: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Characters of context kept on each side of a search match.
    pub context_radius: usize,
    /// Characters returned by a peek without an explicit end.
    pub peek_window: usize,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            peek_window: DEFAULT_PEEK_WINDOW,
        }
    }
}

impl StagingConfig {
    /// Defaults overridden by `DOCSTAGE_*` variables; unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).and_then(|value| value.trim().parse::<usize>().ok());

        if let Some(value) = read("DOCSTAGE_CHUNK_SIZE") {
            self.chunk_size = value;
        }
        if let Some(value) = read("DOCSTAGE_CONTEXT_RADIUS") {
            self.context_radius = value;
        }
        if let Some(value) = read("DOCSTAGE_PEEK_WINDOW") {
            self.peek_window = value;
        }

        self
    }
}
