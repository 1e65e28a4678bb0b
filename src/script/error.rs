use std::path::PathBuf;

use thiserror::Error;

/// A dialogue line names a speaker that is not in the character table.
#[derive(Debug, Error)]
#[error("unknown character '{name}'")]
pub struct LookupError {
    pub name: String,
}

/// A data file is missing, malformed, or describes an unplayable script.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("character '{name}' is defined more than once")]
    DuplicateCharacter { name: String },

    #[error("character '{name}' has an invalid tone ({tone})")]
    InvalidTone { name: String, tone: f32 },

    #[error("dialogue line {line} has no text but is not idle")]
    EmptyText { line: usize },

    #[error("dialogue line {line} cannot be played")]
    Speaker {
        line: usize,
        #[source]
        source: LookupError,
    },
}
