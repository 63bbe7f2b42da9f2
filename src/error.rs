//! Error types.
//!
//! None of these are fatal to the process: configuration errors fall back
//! to the prior value, glyph errors fall back to shape markers, and canvas
//! errors end the frame loop gracefully.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The key is not a recognized setting.
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    /// The value could not be coerced to the setting's type or range.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Settings file could not be read or written.
    #[error("Settings file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML.
    #[error("Settings file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be serialized.
    #[error("Settings serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Color parsing error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized color: {0:?}")]
pub struct ColorParseError(pub String);

/// Canvas errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// The canvas is gone (e.g. the window is being destroyed).
    #[error("Canvas unavailable")]
    Unavailable,

    /// The drawing backend rejected an operation.
    #[error("Canvas backend error: {0}")]
    Backend(String),
}

/// Glyph (substitute image) resolution errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// No image exists at the path.
    #[error("Glyph not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The image exists but could not be loaded or scaled.
    #[error("Glyph {} could not be loaded: {reason}", .path.display())]
    Decode {
        /// Image path.
        path: PathBuf,
        /// Loader diagnostic.
        reason: String,
    },
}

/// Input source errors.
#[derive(Error, Debug)]
pub enum InputError {
    /// The source is already capturing.
    #[error("Input source already started")]
    AlreadyStarted,

    /// Terminal or thread setup failed.
    #[error("Input source I/O error: {0}")]
    Io(#[from] std::io::Error),
}
