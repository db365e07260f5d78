//! Bundled document formats.

use super::{DataDecoder, ValueDocument};
use crate::DecodeError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Strict JSON via `serde_json`. Used when no decoder is specified.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl DataDecoder for JsonDecoder {
    type Document = ValueDocument;

    fn decode_document(&self, data: &[u8]) -> Result<ValueDocument, DecodeError> {
        let value: Value = serde_json::from_slice(data)?;
        ValueDocument::from_value(value)
    }

    fn decode_value<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// JSON5 (comments, trailing commas, unquoted keys) via `json5`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json5Decoder;

impl DataDecoder for Json5Decoder {
    type Document = ValueDocument;

    fn decode_document(&self, data: &[u8]) -> Result<ValueDocument, DecodeError> {
        let value: Value = json5::from_str(std::str::from_utf8(data)?)?;
        ValueDocument::from_value(value)
    }

    fn decode_value<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, DecodeError> {
        Ok(json5::from_str(std::str::from_utf8(data)?)?)
    }
}

/// YAML via `serde_yaml`.
///
/// Unquoted scalars are accepted in overrides, so `author.name=Foo` works.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl DataDecoder for YamlDecoder {
    type Document = ValueDocument;

    fn decode_document(&self, data: &[u8]) -> Result<ValueDocument, DecodeError> {
        let value: Value = serde_yaml::from_slice(data)?;
        // A document consisting only of `~`/`null` has no keys.
        if value.is_null() {
            return Ok(ValueDocument::default());
        }
        ValueDocument::from_value(value)
    }

    fn decode_value<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_yaml::from_slice(data)?)
    }
}
