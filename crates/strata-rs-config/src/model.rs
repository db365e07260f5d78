//! Schema model describing the options of a configuration type.

use crate::Name;
use serde_json::Value;

/// Whether an option may be used freely or should be migrated away from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Availability {
    /// A regular option.
    #[default]
    Available,
    /// Reports an issue carrying the message whenever the option is supplied.
    Deprecated(String),
}

impl Availability {
    /// Deprecation message, if the option is deprecated.
    pub fn deprecation_message(&self) -> Option<&str> {
        match self {
            Availability::Available => None,
            Availability::Deprecated(message) => Some(message),
        }
    }
}

/// Human-facing documentation attached to an option.
///
/// Carried for tooling (reference docs, `--list-options` style output); the
/// resolver never reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    /// A short summary, typically one sentence.
    pub summary: String,
    /// Longer discussion.
    pub discussion: String,
    /// Whether tooling should hide the option from listings.
    pub hidden: bool,
}

/// What an option holds: a leaf value or a nested group of options.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A leaf option and its declared default.
    DefaultValue(Value),
    /// A nested configuration and its child definitions, in declaration order.
    Container(Vec<OptionDefinition>),
}

/// Metadata for a single declared option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDefinition {
    pub name: Name,
    pub content: Content,
    pub availability: Availability,
    pub documentation: Documentation,
}

impl OptionDefinition {
    /// Child definitions when this option is a nested configuration.
    pub fn children(&self) -> Option<&[OptionDefinition]> {
        match &self.content {
            Content::Container(children) => Some(children),
            Content::DefaultValue(_) => None,
        }
    }

    /// Declared default when this option is a leaf.
    pub fn default_value(&self) -> Option<&Value> {
        match &self.content {
            Content::DefaultValue(value) => Some(value),
            Content::Container(_) => None,
        }
    }
}

/// Find the definition named `name` within one level of definitions.
pub fn find_definition<'a>(
    definitions: &'a [OptionDefinition],
    name: &Name,
) -> Option<&'a OptionDefinition> {
    definitions.iter().find(|definition| &definition.name == name)
}
