//! Crate error type

use std::fmt;
use std::path::PathBuf;

/// Errors surfaced by level loading and persistence.
#[derive(Debug)]
pub enum GameError {
    /// No layout source exists for the requested level number
    LevelNotFound { level: u32, path: PathBuf },
    /// The layout source exists but holds no usable layout
    EmptyLevel { level: u32 },
    /// A layout was selected but cannot be read as a level
    MalformedLevel { level: u32, reason: String },
    Io(std::io::Error),
    Json(serde_json::Error),
}

/// Convenience alias for fallible crate operations.
pub type Result<T> = std::result::Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::LevelNotFound { level, path } => {
                write!(f, "level {} not found at {}", level, path.display())
            }
            GameError::EmptyLevel { level } => write!(f, "level {} has no layouts", level),
            GameError::MalformedLevel { level, reason } => {
                write!(f, "level {} layout is malformed: {}", level, reason)
            }
            GameError::Io(e) => write!(f, "i/o error: {}", e),
            GameError::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Json(e)
    }
}
