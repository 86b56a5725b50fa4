use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The material card does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The material card could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The card text is not valid sectioned `key = value` syntax.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A record key cannot be written as a group and a property.
    #[error("invalid key {key:?}: {reason}")]
    KeyFormat { key: String, reason: &'static str },

    /// A record value would not read back unchanged from a card.
    #[error("value of {key:?} cannot be stored in a card: {reason}")]
    ValueFormat { key: String, reason: &'static str },
}

impl Error {
    /// Wrap an I/O error for `path`, keeping missing files distinct.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub fn is_key_format(&self) -> bool {
        matches!(self, Self::KeyFormat { .. })
    }

    pub fn is_value_format(&self) -> bool {
        matches!(self, Self::ValueFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
