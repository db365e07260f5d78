//! Per-key overrides supplied out-of-band (command line, environment).

use crate::name::{PATH_SEPARATOR, dotted_path, join_path};
use crate::{ConfigError, Name};
use log::debug;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Delimiter used by `FromStr` and `Display`.
pub const DEFAULT_DELIMITER: char = '=';

/// An explicit value for a single, possibly nested, option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionOverride {
    /// The option being overridden.
    pub name: Name,
    /// Containers leading to the option; empty for top-level options.
    pub path: Vec<Name>,
    /// Undecoded value, handed to the same decoder as the config document.
    pub value: Vec<u8>,
}

impl OptionOverride {
    pub fn new(name: impl Into<Name>, path: Vec<Name>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            path,
            value: value.into(),
        }
    }

    /// Build an override from full path components, the last being the name.
    ///
    /// Returns `None` when `components` is empty.
    pub fn from_components(mut components: Vec<Name>, value: impl Into<Vec<u8>>) -> Option<Self> {
        let name = components.pop()?;
        Some(Self::new(name, components, value))
    }

    /// Parse `path.to.key<delimiter>value`, splitting on the first delimiter.
    ///
    /// Whitespace around the key and the value is trimmed. Returns `None` when
    /// the delimiter is missing, the key is empty, or the key starts or ends
    /// with `.`.
    ///
    /// ```
    /// use strata_rs_config::{Name, OptionOverride};
    ///
    /// let parsed = OptionOverride::parse("author.name=\"Foo\"", '=').unwrap();
    /// assert_eq!(parsed.name, Name::from("name"));
    /// assert_eq!(parsed.path, vec![Name::from("author")]);
    /// assert_eq!(parsed.value, b"\"Foo\"".to_vec());
    /// ```
    pub fn parse(text: &str, delimiter: char) -> Option<Self> {
        let (key, value) = text.split_once(delimiter)?;
        let key = key.trim();
        let value = value.trim();

        if key.is_empty() || key.starts_with(PATH_SEPARATOR) || key.ends_with(PATH_SEPARATOR) {
            return None;
        }

        let components = key.split(PATH_SEPARATOR).map(Name::from).collect();
        Self::from_components(components, value.as_bytes().to_vec())
    }

    /// Render back to `path.to.key<delimiter>value`.
    pub fn render(&self, delimiter: char) -> String {
        format!(
            "{}{delimiter}{}",
            join_path(&self.path, &self.name),
            String::from_utf8_lossy(&self.value)
        )
    }
}

impl FromStr for OptionOverride {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_DELIMITER).ok_or_else(|| ConfigError::InvalidOverride(s.to_string()))
    }
}

impl fmt::Display for OptionOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_DELIMITER))
    }
}

/// Overrides indexed by path and name for one resolution pass.
///
/// When several overrides target the same path and name, the last one wins.
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    by_path: HashMap<Vec<Name>, HashMap<Name, Vec<u8>>>,
}

impl OverrideStore {
    pub fn new(overrides: impl IntoIterator<Item = OptionOverride>) -> Self {
        let mut store = Self::default();
        for option_override in overrides {
            store.insert(option_override);
        }
        store
    }

    /// Add an override, replacing any earlier one for the same key.
    pub fn insert(&mut self, option_override: OptionOverride) {
        let OptionOverride { name, path, value } = option_override;
        let entries = self.by_path.entry(path).or_default();
        if entries.contains_key(&name) {
            debug!("override for '{name}' replaced by a later override");
        }
        entries.insert(name, value);
    }

    /// Raw value of the override for `name` directly at `path`.
    pub fn get(&self, path: &[Name], name: &Name) -> Option<&[u8]> {
        self.by_path
            .get(path)
            .and_then(|entries| entries.get(name))
            .map(Vec::as_slice)
    }

    /// Names present at `path`.
    ///
    /// Includes the names overridden directly at `path` and the next segment
    /// of every override nested deeper below it.
    pub fn names_at(&self, path: &[Name]) -> BTreeSet<Name> {
        let mut names = BTreeSet::new();
        for (override_path, entries) in &self.by_path {
            if override_path.as_slice() == path {
                names.extend(entries.keys().cloned());
            } else if override_path.len() > path.len() && override_path.starts_with(path) {
                names.insert(override_path[path.len()].clone());
            }
        }
        names
    }

    /// Number of distinct overridden keys.
    pub fn len(&self) -> usize {
        self.by_path.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every override as `(dotted.path.name, raw value)`, sorted by key.
    pub fn entries(&self) -> Vec<(String, &[u8])> {
        let mut entries: Vec<_> = self
            .by_path
            .iter()
            .flat_map(|(path, values)| {
                values
                    .iter()
                    .map(move |(name, value)| (join_path(path, name), value.as_slice()))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl FromIterator<OptionOverride> for OverrideStore {
    fn from_iter<I: IntoIterator<Item = OptionOverride>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for OverrideStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: BTreeSet<String> = self.by_path.keys().map(|path| dotted_path(path)).collect();
        write!(f, "{} override(s) across {} path(s)", self.len(), paths.len())
    }
}
