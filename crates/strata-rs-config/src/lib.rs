//! Strongly-typed configuration resolved from layered sources.
//!
//! Each option of a [`Configuration`] is resolved from, in order of
//! precedence: an explicit [`OptionOverride`] for its path and name, the
//! parsed config document, and finally the default declared alongside it.
//! Keys nobody declared and keys marked deprecated are reported to an
//! [`IssueSink`] instead of failing the parse; only a value of the wrong type
//! for a declared option is an error.

mod configuration;
mod document;
mod error;
mod issue;
mod model;
mod name;
mod overrides;
mod resolver;

/// The trait implemented by configuration types, with its parse entry points.
pub use configuration::Configuration;
/// Document formats and the traits the resolver reads documents through.
pub use document::{
    DataDecoder, DocumentContainer, Json5Decoder, JsonDecoder, ValueDocument, YamlDecoder,
};
/// Public error types returned by parsing and resolution.
pub use error::{ConfigError, DecodeError, ValueSource};
/// Diagnostics and the sinks that receive them.
pub use issue::{IgnoreIssues, Issue, IssueKind, IssueSink, LogIssues};
/// Schema models.
pub use model::*;
pub use name::{Name, PATH_SEPARATOR, dotted_path};
pub use overrides::{DEFAULT_DELIMITER, OptionOverride, OverrideStore};
/// Resolution engine.
pub use resolver::{Leaf, Nested, OptionBuilder, Options, resolve};
