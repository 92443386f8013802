//! Sort directives and expansion paths.

use std::fmt;

/// Direction of a sort directive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending (`asc`).
    #[default]
    Asc,
    /// Descending (`desc`).
    Desc,
}

impl SortDirection {
    /// Returns the wire token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered sort directives keyed by field path.
///
/// Setting a direction on a field that is already present overwrites the
/// direction and keeps the field's original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderStore {
    entries: Vec<(String, SortDirection)>,
}

impl OrderStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records `direction` for `path`.
    pub fn set(&mut self, path: impl Into<String>, direction: SortDirection) {
        let path = path.into();
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = direction,
            None => self.entries.push((path, direction)),
        }
    }

    /// The directives in order of first use.
    #[must_use]
    pub fn entries(&self) -> &[(String, SortDirection)] {
        &self.entries
    }

    /// Renders the `order` parameter value, `None` when empty.
    #[must_use]
    pub fn to_query_value(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(|(path, direction)| format!("{path},{direction}"))
                .collect::<Vec<_>>()
                .join(";"),
        )
    }
}

/// Ordered expansion paths.
///
/// Adding a path twice is accepted; the path is kept once, at its first position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandStore {
    paths: Vec<String>,
}

impl ExpandStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Records `path`.
    pub fn add(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// The recorded paths.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Renders the `expand` parameter value, `None` when empty.
    #[must_use]
    pub fn to_query_value(&self) -> Option<String> {
        if self.paths.is_empty() {
            None
        } else {
            Some(self.paths.join(","))
        }
    }
}
