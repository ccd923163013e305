//! Accessor installation.

use crate::{Container, FieldSpec, Proxy, Trap, TrapTable};
use fieldproxy_path::Path;
use serde_json::Value;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::debug;

/// What an [`install`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    /// Fields that received an accessor, in installation order.
    pub fields: Vec<String>,
    /// True when the target could not hold fields; every installed accessor
    /// then reads `None` and drops writes.
    pub inert: bool,
}

/// A live getter/setter pair bound to one field of one target.
pub(crate) struct Accessor {
    target: Rc<dyn Container>,
    field: Path,
    trap: Trap,
}

impl Accessor {
    fn new(target: Rc<dyn Container>, name: &str, trap: Trap) -> Self {
        Self {
            target,
            field: Path::field(name),
            trap,
        }
    }

    pub(crate) fn get(&self, source: &Proxy) -> Option<Value> {
        if !self.target.is_object() {
            return None;
        }
        match &self.trap {
            Trap::Redirect(path) => self.target.read_path(path),
            Trap::Transform { get: Some(get), .. } => {
                let raw = self.target.read_path(&self.field);
                get(source, raw)
            }
            _ => self.target.read_path(&self.field),
        }
    }

    pub(crate) fn set(&self, source: &Proxy, value: Value) -> bool {
        if !self.target.is_object() {
            return false;
        }
        match &self.trap {
            Trap::Redirect(path) => self.target.write_path(path, value),
            Trap::Transform { set: Some(set), .. } => {
                let stored = set(source, value);
                self.target.write_path(&self.field, stored)
            }
            _ => self.target.write_path(&self.field, value),
        }
    }

    /// Writes `value` at `rest` below the location this accessor is bound
    /// to. Transforms apply to whole field values, so neither half runs here.
    pub(crate) fn set_within(&self, rest: &Path, value: Value) -> bool {
        if !self.target.is_object() {
            return false;
        }
        self.target.write_path(&self.binding().join(rest), value)
    }

    fn binding(&self) -> &Path {
        match &self.trap {
            Trap::Redirect(path) => path,
            _ => &self.field,
        }
    }
}

/// Installs live accessors on `source` that delegate to `target`.
///
/// The fields considered are the target's current fields plus any names the
/// specification selects. With [`FieldSpec::All`] every one of them gets an
/// accessor; otherwise only the selected names do. An existing accessor or
/// plain field of the same name on `source` is replaced, so installing twice
/// is harmless.
///
/// A `target` that cannot hold fields is not an error: accessors are still
/// installed for the selected names, but they read `None` and drop writes.
pub fn install(
    source: &Proxy,
    target: impl Container + 'static,
    spec: impl Into<FieldSpec>,
) -> Installed {
    let target: Rc<dyn Container> = Rc::new(target);
    let (traps, selection) = match spec.into() {
        FieldSpec::All => (TrapTable::new(), None),
        FieldSpec::Fields(names) => (TrapTable::new(), Some(names)),
        FieldSpec::Traps(table) => {
            let names = table.names().map(str::to_string).collect::<Vec<_>>();
            (table, Some(names))
        }
    };

    let inert = !target.is_object();
    let mut candidates = if inert { Vec::new() } else { target.field_names() };
    if let Some(selected) = &selection {
        candidates.extend(selected.iter().cloned());
    }

    let selected: Option<HashSet<&str>> = selection
        .as_ref()
        .map(|names| names.iter().map(String::as_str).collect());
    let mut seen = HashSet::new();
    let mut fields = Vec::new();

    for name in candidates {
        if !seen.insert(name.clone()) {
            continue;
        }
        if selected
            .as_ref()
            .is_some_and(|selected| !selected.contains(name.as_str()))
        {
            continue;
        }
        let trap = traps.get(&name).cloned().unwrap_or_default();
        source.define(&name, Accessor::new(Rc::clone(&target), &name, trap));
        fields.push(name);
    }

    debug!(fields = fields.len(), inert, "installed field accessors");
    Installed { fields, inert }
}
