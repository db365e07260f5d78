//! Non-fatal diagnostics collected while resolving a configuration.

use crate::Name;
use crate::name::dotted_path;
use log::warn;
use std::fmt;

/// Kind of a reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// A key was supplied that no option declares.
    UnexpectedOption,
    /// A value was supplied for an option marked deprecated.
    DeprecatedOption,
}

/// A diagnostic about one key at one location of the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Issue {
    pub kind: IssueKind,
    pub name: Name,
    /// Containers leading to the key; empty at the root.
    pub path: Vec<Name>,
    /// Deprecation message for deprecated options, empty otherwise.
    pub description: String,
}

impl Issue {
    pub fn unexpected_option(name: Name, path: Vec<Name>) -> Self {
        Self {
            kind: IssueKind::UnexpectedOption,
            name,
            path,
            description: String::new(),
        }
    }

    pub fn deprecated_option(name: Name, path: Vec<Name>, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::DeprecatedOption,
            name,
            path,
            description: message.into(),
        }
    }

    /// `'name'` or `'name' (in 'dotted.path')`.
    fn quoted_location(&self) -> String {
        if self.path.is_empty() {
            format!("'{}'", self.name)
        } else {
            format!("'{}' (in '{}')", self.name, dotted_path(&self.path))
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::UnexpectedOption => write!(
                f,
                "Found unexpected property {} while decoding.",
                self.quoted_location()
            ),
            IssueKind::DeprecatedOption => write!(
                f,
                "Property {} is deprecated. {}",
                self.quoted_location(),
                self.description
            ),
        }
    }
}

/// Receives issues synchronously as the resolver walks the tree.
pub trait IssueSink {
    fn record(&mut self, issue: Issue);
}

impl<F> IssueSink for F
where
    F: FnMut(Issue),
{
    fn record(&mut self, issue: Issue) {
        self(issue)
    }
}

/// Sink that discards every issue.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreIssues;

impl IssueSink for IgnoreIssues {
    fn record(&mut self, _issue: Issue) {}
}

/// Sink that logs each issue at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogIssues;

impl IssueSink for LogIssues {
    fn record(&mut self, issue: Issue) {
        warn!("{issue}");
    }
}
