//! Crate-level error types.

use std::fmt;

/// Errors produced by the eyeview crate.
#[derive(Debug)]
pub enum EyeViewError {
    /// Malformed or inconsistent annotation registry (fatal at startup).
    Configuration(String),
    /// Selection requested for an annotation id that is not registered.
    NotFound(String),
    /// Toggle requested for a condition id outside the known set.
    UnknownCondition(String),
    /// The host failed to load the eye model asset.
    AssetLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for EyeViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => {
                write!(f, "annotation registry error: {msg}")
            }
            Self::NotFound(id) => write!(f, "unknown annotation id: {id}"),
            Self::UnknownCondition(id) => {
                write!(f, "unknown condition id: {id}")
            }
            Self::AssetLoad(msg) => write!(f, "model load error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for EyeViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EyeViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
