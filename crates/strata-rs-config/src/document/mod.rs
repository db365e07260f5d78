//! Parsed config documents and the decoders that produce them.
//!
//! The resolver only sees the [`DocumentContainer`] and [`DataDecoder`]
//! traits. Every bundled format decodes into a [`ValueDocument`], a keyed view
//! over a `serde_json::Value` object tree.

mod formats;

pub use formats::{Json5Decoder, JsonDecoder, YamlDecoder};

use crate::{DecodeError, Name};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Keyed view over one node of a parsed config document.
pub trait DocumentContainer: Sized {
    /// Keys present at this node.
    fn keys(&self) -> BTreeSet<Name>;

    /// Decode the value stored under `name`.
    ///
    /// Returns `Ok(None)` when the key is missing or explicitly null and an
    /// error only when a present value does not have the requested type.
    fn decode_if_present<T: DeserializeOwned>(&self, name: &Name) -> Result<Option<T>, DecodeError>;

    /// Descend into the object stored under `name`.
    ///
    /// Returns `Ok(None)` when the key is missing or null and an error when
    /// the value is not an object.
    fn child_container(&self, name: &Name) -> Result<Option<Self>, DecodeError>;
}

/// A document format: decodes whole documents and individual override values.
pub trait DataDecoder {
    type Document: DocumentContainer;

    /// Parse raw bytes into a document root.
    fn decode_document(&self, data: &[u8]) -> Result<Self::Document, DecodeError>;

    /// Decode a single raw value (an override) as `T`.
    fn decode_value<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, DecodeError>;
}

/// Document node backed by a JSON object map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueDocument {
    entries: Map<String, Value>,
}

impl ValueDocument {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Wrap a value that must be an object.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        match value {
            Value::Object(entries) => Ok(Self::new(entries)),
            other => Err(DecodeError::NotAnObject(value_kind(&other))),
        }
    }

    /// Present, non-null value under `name`.
    fn present(&self, name: &Name) -> Option<&Value> {
        self.entries
            .get(name.as_str())
            .filter(|value| !value.is_null())
    }
}

impl DocumentContainer for ValueDocument {
    fn keys(&self) -> BTreeSet<Name> {
        self.entries.keys().map(|key| Name::from(key.as_str())).collect()
    }

    fn decode_if_present<T: DeserializeOwned>(&self, name: &Name) -> Result<Option<T>, DecodeError> {
        match self.present(name) {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }

    fn child_container(&self, name: &Name) -> Result<Option<Self>, DecodeError> {
        match self.present(name) {
            Some(Value::Object(entries)) => Ok(Some(Self::new(entries.clone()))),
            Some(other) => Err(DecodeError::NotAnObject(value_kind(other))),
            None => Ok(None),
        }
    }
}

/// Short description of a JSON value's type for error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
