//! Option names and the paths that locate them in a nested configuration.

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a single configuration key.
///
/// Equality is exact string equality: no case folding or other normalization
/// is applied, so `"Level"` and `"level"` are distinct names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    /// Create a name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Name> for Name {
    fn from(value: &Name) -> Self {
        value.clone()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Separator between path segments in override keys and rendered paths.
pub const PATH_SEPARATOR: char = '.';

/// Render a path as dotted text (`author.contact`); empty for the root.
pub fn dotted_path(path: &[Name]) -> String {
    path.iter()
        .map(Name::as_str)
        .collect::<Vec<_>>()
        .join(".")
}

/// Render the path of `name` below `path`, including the name itself.
pub(crate) fn join_path(path: &[Name], name: &Name) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}{PATH_SEPARATOR}{name}", dotted_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_compare_exactly() {
        assert_ne!(Name::from("level"), Name::from("Level"));
        assert_eq!(Name::from("level"), Name::new(String::from("level")));
    }

    #[test]
    fn joins_paths_with_separator() {
        let path = vec![Name::from("author"), Name::from("contact")];
        assert_eq!(dotted_path(&path), "author.contact");
        assert_eq!(dotted_path(&[]), "");
        assert_eq!(join_path(&path, &Name::from("email")), "author.contact.email");
        assert_eq!(join_path(&[], &Name::from("email")), "email");
    }
}
