//! Resolution engine.
//!
//! A [`Configuration`] describes itself by calling [`Options::option`] and
//! [`Options::nested`] from its `configure` function. That function runs in
//! one of two modes:
//!
//! - *declare*: every call records an [`OptionDefinition`] and yields the
//!   declared default, producing the schema and the default value;
//! - *resolve*: every call looks the option up in the override store, then the
//!   document, then falls back to the declared default.
//!
//! Before a level is resolved its schema is derived and every key present in
//! the document or the overrides at that level is checked against it, so
//! unexpected and deprecated keys are reported even when a value is never
//! read.


use crate::document::{DataDecoder, DocumentContainer, JsonDecoder};
use crate::model::find_definition;
use crate::name::{dotted_path, join_path};
use crate::{
    Availability, ConfigError, Configuration, Content, DecodeError, Documentation, Issue,
    IssueSink, Name, OptionDefinition, OverrideStore, ValueSource,
};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Handle through which a configuration declares and reads its options.
pub struct Options<'a, D: DataDecoder> {
    mode: Mode<'a, D>,
}

enum Mode<'a, D: DataDecoder> {
    Declare(Vec<OptionDefinition>),
    Resolve(Scope<'a, D>),
}

/// Everything needed to resolve one level of the tree.
struct Scope<'a, D: DataDecoder> {
    decoder: &'a D,
    document: Option<D::Document>,
    overrides: &'a OverrideStore,
    path: Vec<Name>,
    sink: &'a mut dyn IssueSink,
}

impl<'a, D: DataDecoder> Options<'a, D> {
    /// Declare a leaf option with its default value.
    pub fn option<T>(
        &mut self,
        name: impl Into<Name>,
        default: T,
    ) -> OptionBuilder<'_, 'a, D, Leaf<T>> {
        OptionBuilder::new(self, name.into(), Leaf(default))
    }

    /// Declare an option holding a nested configuration.
    pub fn nested(&mut self, name: impl Into<Name>) -> OptionBuilder<'_, 'a, D, Nested> {
        OptionBuilder::new(self, name.into(), Nested)
    }

    /// Path of the level being resolved; empty at the root and while declaring.
    pub fn path(&self) -> &[Name] {
        match &self.mode {
            Mode::Declare(_) => &[],
            Mode::Resolve(scope) => &scope.path,
        }
    }
}

/// Marker for a leaf option carrying its typed default.
pub struct Leaf<T>(T);

/// Marker for an option holding a nested configuration.
pub struct Nested;

/// Builder returned by [`Options::option`] and [`Options::nested`].
///
/// Nothing is declared or resolved until `resolve` is called.
#[must_use = "call `resolve()` to declare and read the option"]
pub struct OptionBuilder<'o, 'a, D: DataDecoder, K> {
    options: &'o mut Options<'a, D>,
    name: Name,
    availability: Availability,
    documentation: Documentation,
    kind: K,
}

impl<'o, 'a, D: DataDecoder, K> OptionBuilder<'o, 'a, D, K> {
    fn new(options: &'o mut Options<'a, D>, name: Name, kind: K) -> Self {
        Self {
            options,
            name,
            availability: Availability::Available,
            documentation: Documentation::default(),
            kind,
        }
    }

    /// Mark the option deprecated; supplying it reports `message`.
    pub fn deprecated(self, message: impl Into<String>) -> Self {
        self.availability(Availability::Deprecated(message.into()))
    }

    pub fn availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.documentation.summary = summary.into();
        self
    }

    pub fn discussion(mut self, discussion: impl Into<String>) -> Self {
        self.documentation.discussion = discussion.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.documentation.hidden = hidden;
        self
    }
}

impl<D: DataDecoder, T: Serialize + DeserializeOwned> OptionBuilder<'_, '_, D, Leaf<T>> {
    /// Declare the option, or read it as `T`: override, then document, then default.
    pub fn resolve(self) -> Result<T, ConfigError> {
        let Self {
            options,
            name,
            availability,
            documentation,
            kind: Leaf(default),
        } = self;

        match &mut options.mode {
            Mode::Declare(definitions) => {
                // Defaults that cannot be represented as a value tree are listed as null.
                let value = serde_json::to_value(&default).unwrap_or(Value::Null);
                push_definition(
                    definitions,
                    OptionDefinition {
                        name,
                        content: Content::DefaultValue(value),
                        availability,
                        documentation,
                    },
                );
                Ok(default)
            }
            Mode::Resolve(scope) => scope.resolve_leaf(&name, default),
        }
    }
}

impl<D: DataDecoder> OptionBuilder<'_, '_, D, Nested> {
    /// Declare the option, or resolve the nested configuration one level down.
    pub fn resolve<C: Configuration>(self) -> Result<C, ConfigError> {
        let Self {
            options,
            name,
            availability,
            documentation,
            kind: Nested,
        } = self;

        match &mut options.mode {
            Mode::Declare(definitions) => {
                let (children, value) = declare::<C>();
                push_definition(
                    definitions,
                    OptionDefinition {
                        name,
                        content: Content::Container(children),
                        availability,
                        documentation,
                    },
                );
                value
            }
            Mode::Resolve(scope) => scope.resolve_nested(&name),
        }
    }
}

impl<D: DataDecoder> Scope<'_, D> {
    fn resolve_leaf<T: DeserializeOwned>(
        &self,
        name: &Name,
        default: T,
    ) -> Result<T, ConfigError> {
        if let Some(raw) = self.overrides.get(&self.path, name) {
            debug!("option '{}' resolved from override", join_path(&self.path, name));
            return self
                .decoder
                .decode_value(raw)
                .map_err(|error| self.decode_failed(name, ValueSource::Override, error));
        }

        if let Some(document) = &self.document {
            if let Some(value) = document
                .decode_if_present(name)
                .map_err(|error| self.decode_failed(name, ValueSource::Document, error))?
            {
                debug!("option '{}' resolved from document", join_path(&self.path, name));
                return Ok(value);
            }
        }

        debug!("option '{}' resolved from default", join_path(&self.path, name));
        Ok(default)
    }

    fn resolve_nested<C: Configuration>(&mut self, name: &Name) -> Result<C, ConfigError> {
        // A whole-object override replaces the document node for this container.
        // A null override counts as absent, as a null document value does.
        let container_override = self
            .overrides
            .get(&self.path, name)
            .filter(|raw| !matches!(self.decoder.decode_value::<Value>(raw), Ok(Value::Null)));
        let document = match container_override {
            Some(raw) => Some(
                self.decoder
                    .decode_document(raw)
                    .map_err(|error| self.decode_failed(name, ValueSource::Override, error))?,
            ),
            None => match &self.document {
                Some(document) => document
                    .child_container(name)
                    .map_err(|error| self.decode_failed(name, ValueSource::Document, error))?,
                None => None,
            },
        };

        let mut path = self.path.clone();
        path.push(name.clone());
        resolve::<C, D>(self.decoder, document, self.overrides, path, &mut *self.sink)
    }

    fn decode_failed(&self, name: &Name, origin: ValueSource, error: DecodeError) -> ConfigError {
        ConfigError::DecodeFailed {
            path: join_path(&self.path, name),
            origin,
            error,
        }
    }
}

/// Resolve configuration `C` at `path`.
///
/// Issues for the level and every nested level are handed to `sink` before
/// the corresponding values are read. Fails when a present value for a
/// declared option cannot be decoded as that option's type, or when the
/// resolved value is rejected by [`Configuration::validate`].
pub fn resolve<C: Configuration, D: DataDecoder>(
    decoder: &D,
    document: Option<D::Document>,
    overrides: &OverrideStore,
    path: Vec<Name>,
    sink: &mut dyn IssueSink,
) -> Result<C, ConfigError> {
    let definitions = C::definitions();
    debug!(
        "resolving level '{}' (options={}, document={})",
        dotted_path(&path),
        definitions.len(),
        document.is_some()
    );
    report_issues(&definitions, document.as_ref(), overrides, &path, sink);

    let mut options = Options {
        mode: Mode::Resolve(Scope {
            decoder,
            document,
            overrides,
            path,
            sink,
        }),
    };
    let value = C::configure(&mut options)?;
    value.validate()?;
    Ok(value)
}

/// Run `configure` in declare mode, yielding the schema and the defaults.
pub(crate) fn declare<C: Configuration>() -> (Vec<OptionDefinition>, Result<C, ConfigError>) {
    let mut options: Options<'_, JsonDecoder> = Options {
        mode: Mode::Declare(Vec::new()),
    };
    let value = C::configure(&mut options);
    let definitions = match options.mode {
        Mode::Declare(definitions) => definitions,
        Mode::Resolve(_) => Vec::new(),
    };
    (definitions, value)
}

/// Names within one level must be unique.
fn push_definition(definitions: &mut Vec<OptionDefinition>, definition: OptionDefinition) {
    assert!(
        find_definition(definitions, &definition.name).is_none(),
        "option '{}' is declared more than once",
        definition.name
    );
    definitions.push(definition);
}

/// Report every unexpected or deprecated key present at one level.
fn report_issues<Doc: DocumentContainer>(
    definitions: &[OptionDefinition],
    document: Option<&Doc>,
    overrides: &OverrideStore,
    path: &[Name],
    sink: &mut dyn IssueSink,
) {
    let mut keys = document.map(DocumentContainer::keys).unwrap_or_default();
    keys.extend(overrides.names_at(path));

    for key in keys {
        match find_definition(definitions, &key) {
            None => sink.record(Issue::unexpected_option(key, path.to_vec())),
            Some(definition) => {
                if let Some(message) = definition.availability.deprecation_message() {
                    sink.record(Issue::deprecated_option(key, path.to_vec(), message));
                }
            }
        }
    }
}
