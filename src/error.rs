// Error types for One Hand
// Navigator commands never fail; these cover config, pages and key chords.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unsupported page format: {0}")]
    UnsupportedPage(PathBuf),

    #[error("invalid page: {0}")]
    InvalidPage(String),

    #[error("invalid key chord {chord:?}: {reason}")]
    KeyChord { chord: String, reason: String },

    #[error("invalid color {0:?}, expected #rrggbb")]
    Color(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn chord(chord: &str, reason: impl Into<String>) -> Self {
        Self::KeyChord {
            chord: chord.to_string(),
            reason: reason.into(),
        }
    }
}
