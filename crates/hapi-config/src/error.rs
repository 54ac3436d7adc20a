//! Error types for loading and reading settings.
//!
//! There are exactly two ways configuration can go wrong, and both are fatal
//! at startup:
//!
//! - [`ConfigLoadError`] – a layer could not be read or is not a valid
//!   properties file.
//! - [`ConfigParseError`] – a present, non-empty value does not parse as the
//!   type its key declares.
//!
//! Absent and empty values are never errors; they resolve to the documented
//! default instead.

use std::num::ParseIntError;

use thiserror::Error;

use crate::domain::key::SettingKey;

/// A settings layer could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The bundled resource with this name does not exist.
    #[error("could not load HAPI properties: bundled resource {name} not found")]
    MissingResource { name: String },

    /// A file system I/O error occurred while reading a layer.
    #[error("could not load HAPI properties file {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The layer was read but is not valid properties text.
    #[error("malformed HAPI properties in {source_name} at line {line}: {reason}")]
    Malformed {
        source_name: String,
        line: usize,
        reason: String,
    },
}

/// A stored value does not parse as its key's declared type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigParseError {
    /// An int-typed key holds something other than a base-10 `i32`.
    #[error("setting {key} = {value:?} is not a valid integer: {source}")]
    InvalidInteger {
        key: SettingKey,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// An enum-typed key holds a token outside its accepted set.
    #[error("setting {key} = {value:?} is not one of [{expected}]")]
    UnknownToken {
        key: SettingKey,
        value: String,
        expected: String,
    },
}

impl ConfigParseError {
    /// The key whose value failed to parse.
    pub fn key(&self) -> SettingKey {
        match self {
            Self::InvalidInteger { key, .. } | Self::UnknownToken { key, .. } => *key,
        }
    }
}

/// Either kind of configuration fault.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] ConfigLoadError),

    #[error(transparent)]
    Parse(#[from] ConfigParseError),
}

impl ConfigError {
    /// Returns `true` for faults raised while reading a layer.
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Returns `true` for faults raised while parsing a typed value.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
