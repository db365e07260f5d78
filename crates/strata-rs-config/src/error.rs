//! Error types for configuration parsing and resolution.

use std::fmt;
use thiserror::Error;

/// Errors returned while parsing or resolving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a config file failed.
    #[error("failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),
    /// The config document could not be parsed.
    #[error("failed to parse config: {0}")]
    ParseFailed(#[source] DecodeError),
    /// A value supplied for a declared option has the wrong type.
    #[error("failed to decode {origin} value for '{path}': {error}")]
    DecodeFailed {
        /// Dotted path of the option, including its name.
        path: String,
        /// Where the offending value came from.
        origin: ValueSource,
        #[source]
        error: DecodeError,
    },
    /// An override string did not have the `<path.to.key>=<value>` shape.
    #[error("invalid config override '{0}': expected <path.to.key>=<value>")]
    InvalidOverride(String),
    /// Generic validation failure raised by a configuration type.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Origin of a value that failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// An explicit per-key override.
    Override,
    /// The parsed config document.
    Document,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Override => f.write_str("override"),
            ValueSource::Document => f.write_str("document"),
        }
    }
}

/// Errors produced by a document decoder.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Json5(#[from] json5::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// A node that must hold keyed values held something else.
    #[error("expected object, found {0}")]
    NotAnObject(&'static str),
}
