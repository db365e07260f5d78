//! The `Configuration` trait and its parsing entry points.

use crate::document::{DataDecoder, Json5Decoder, JsonDecoder, YamlDecoder};
use crate::resolver::{self, Options};
use crate::{ConfigError, IssueSink, OptionDefinition, OptionOverride, OverrideStore};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// A strongly-typed configuration resolved from overrides, a document, and
/// declared defaults, in that order of precedence.
///
/// ```
/// use strata_rs_config::{ConfigError, Configuration, DataDecoder, Issue, OptionOverride, Options};
///
/// #[derive(Debug, PartialEq)]
/// struct Greeting {
///     repeat_count: i64,
///     greeting: String,
/// }
///
/// impl Configuration for Greeting {
///     fn configure<D: DataDecoder>(options: &mut Options<'_, D>) -> Result<Self, ConfigError> {
///         Ok(Self {
///             repeat_count: options.option("repeatCount", 10).resolve()?,
///             greeting: options
///                 .option("greeting", "Hello".to_string())
///                 .summary("What to print")
///                 .resolve()?,
///         })
///     }
/// }
///
/// let overrides = vec!["greeting=\"Hi\"".parse::<OptionOverride>()?];
/// let mut issues = Vec::new();
/// let greeting = Greeting::parse(br#"{ "repeatCount": 2 }"#, &overrides, &mut |issue: Issue| {
///     issues.push(issue)
/// })?;
/// assert_eq!(greeting, Greeting { repeat_count: 2, greeting: "Hi".into() });
/// assert!(issues.is_empty());
/// # Ok::<(), ConfigError>(())
/// ```
pub trait Configuration: Sized {
    /// Declare every option through `options` and build the value from what it returns.
    ///
    /// Called both to derive the schema and to resolve values, so it must be
    /// deterministic and declare the same options on every call. Validation
    /// belongs in [`Configuration::validate`].
    fn configure<D: DataDecoder>(options: &mut Options<'_, D>) -> Result<Self, ConfigError>;

    /// Check a resolved value, e.g. cross-field constraints.
    ///
    /// Runs after every resolution, nested levels included, but never while
    /// deriving definitions or defaults. Return [`ConfigError::Invalid`] to
    /// reject the value.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Ordered option definitions of this configuration.
    fn definitions() -> Vec<OptionDefinition> {
        resolver::declare::<Self>().0
    }

    /// The configuration with every option at its declared default.
    ///
    /// # Panics
    ///
    /// Panics when `configure` rejects its own defaults, which is a defect in
    /// the configuration type rather than in user input.
    fn defaults() -> Self {
        match resolver::declare::<Self>().1 {
            Ok(value) => value,
            Err(err) => panic!("configuration defaults failed to resolve: {err}"),
        }
    }

    /// Parse a JSON document with the given overrides.
    fn parse(
        data: &[u8],
        overrides: &[OptionOverride],
        sink: &mut dyn IssueSink,
    ) -> Result<Self, ConfigError> {
        Self::parse_with(&JsonDecoder, Some(data), overrides, sink)
    }

    /// Resolve from overrides alone; everything else takes its default.
    fn parse_overrides(
        overrides: &[OptionOverride],
        sink: &mut dyn IssueSink,
    ) -> Result<Self, ConfigError> {
        Self::parse_with(&JsonDecoder, None, overrides, sink)
    }

    /// Parse an optional document with `decoder`, which also decodes override values.
    fn parse_with<D: DataDecoder>(
        decoder: &D,
        data: Option<&[u8]>,
        overrides: &[OptionOverride],
        sink: &mut dyn IssueSink,
    ) -> Result<Self, ConfigError> {
        let document = data
            .map(|data| decoder.decode_document(data))
            .transpose()
            .map_err(ConfigError::ParseFailed)?;
        let overrides = OverrideStore::new(overrides.iter().cloned());
        debug!(
            "parsing configuration (document={}, {overrides})",
            document.is_some()
        );
        resolver::resolve::<Self, D>(decoder, document, &overrides, Vec::new(), sink)
    }

    /// Read and parse a config file, choosing the format from its extension.
    ///
    /// `.json5` files use JSON5, `.yaml`/`.yml` use YAML, anything else JSON.
    fn load_from_path(
        path: impl AsRef<Path>,
        overrides: &[OptionOverride],
        sink: &mut dyn IssueSink,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json5") => Self::load_from_path_with(&Json5Decoder, path, overrides, sink),
            Some("yaml" | "yml") => Self::load_from_path_with(&YamlDecoder, path, overrides, sink),
            _ => Self::load_from_path_with(&JsonDecoder, path, overrides, sink),
        }
    }

    /// Read and parse a config file with an explicit decoder.
    fn load_from_path_with<D: DataDecoder>(
        decoder: &D,
        path: impl AsRef<Path>,
        overrides: &[OptionOverride],
        sink: &mut dyn IssueSink,
    ) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read(path)?;
        Self::parse_with(decoder, Some(contents.as_slice()), overrides, sink)
    }
}
