//! Field selection and remapping input for [`install`](crate::install).

use crate::{Error, Result, Trap};
use fieldproxy_path::Path;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Ordered mapping from field name to [`Trap`]. Names are unique; inserting
/// an existing name replaces its trap in place.
#[derive(Debug, Clone, Default)]
pub struct TrapTable {
    entries: Vec<(String, Trap)>,
}

impl TrapTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the trap for `name`.
    pub fn insert(&mut self, name: impl Into<String>, trap: impl Into<Trap>) {
        let name = name.into();
        let trap = trap.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = trap,
            None => self.entries.push((name, trap)),
        }
    }

    /// Builder form of [`TrapTable::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, trap: impl Into<Trap>) -> Self {
        self.insert(name, trap);
        self
    }

    /// Redirects `name` to `path` on the target.
    #[must_use]
    pub fn redirect(self, name: impl Into<String>, path: impl Into<Path>) -> Self {
        self.with(name, Trap::Redirect(path.into()))
    }

    /// Selects `name` with plain same-named access.
    #[must_use]
    pub fn identity(self, name: impl Into<String>) -> Self {
        self.with(name, Trap::Identity)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Trap> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Trap)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, T: Into<Trap>> FromIterator<(N, T)> for TrapTable {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut table = TrapTable::new();
        for (name, trap) in iter {
            table.insert(name, trap);
        }
        table
    }
}

/// Which fields a proxy exposes, and how.
#[derive(Debug, Clone, Default)]
pub enum FieldSpec {
    /// Every field present on the target at install time, same-named.
    #[default]
    All,
    /// Exactly these fields, same-named, whether or not the target has them.
    Fields(Vec<String>),
    /// Exactly the table's fields, each with its own trap.
    Traps(TrapTable),
}

impl FieldSpec {
    #[must_use]
    pub fn all() -> Self {
        Self::All
    }

    pub fn fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(names.into_iter().map(Into::into).collect())
    }

    /// The explicitly selected names, or `None` when every field is selected.
    #[must_use]
    pub fn selection(&self) -> Option<Vec<String>> {
        match self {
            Self::All => None,
            Self::Fields(names) => Some(names.clone()),
            Self::Traps(table) => Some(table.names().map(str::to_string).collect()),
        }
    }

    /// Parses a field specification from JSON text.
    ///
    /// `null` selects everything, a list of strings selects those fields, and
    /// an object maps field names to a redirect path string or to
    /// `null`/`{}` for plain access.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::All),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(name) => Ok(name),
                    other => Err(Error::InvalidFieldSpec(format!(
                        "field list entry {i} must be a string, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Fields),
            Value::Object(map) => {
                let mut table = TrapTable::new();
                for (name, raw) in &map {
                    table.insert(name.as_str(), Trap::from_json(name, raw)?);
                }
                Ok(Self::Traps(table))
            }
            other => Err(Error::InvalidFieldSpec(format!(
                "expected null, a list of field names or an object of traps, got {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<TrapTable> for FieldSpec {
    fn from(table: TrapTable) -> Self {
        Self::Traps(table)
    }
}

impl From<&TrapTable> for FieldSpec {
    fn from(table: &TrapTable) -> Self {
        Self::Traps(table.clone())
    }
}

impl From<&FieldSpec> for FieldSpec {
    fn from(spec: &FieldSpec) -> Self {
        spec.clone()
    }
}

impl From<Vec<String>> for FieldSpec {
    fn from(names: Vec<String>) -> Self {
        Self::Fields(names)
    }
}

impl From<Vec<&str>> for FieldSpec {
    fn from(names: Vec<&str>) -> Self {
        Self::fields(names)
    }
}

impl From<&[&str]> for FieldSpec {
    fn from(names: &[&str]) -> Self {
        Self::fields(names.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for FieldSpec {
    fn from(names: [&str; N]) -> Self {
        Self::fields(names)
    }
}

impl From<()> for FieldSpec {
    fn from((): ()) -> Self {
        Self::All
    }
}

impl<T: Into<FieldSpec>> From<Option<T>> for FieldSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map_or(Self::All, Into::into)
    }
}
