//! Containers that accessors read from and write to.
//!
//! - [`Container`] — the capability accessors rely on
//! - [`Target`] — a shared handle owning a JSON value
//!
//! [`Proxy`](crate::Proxy) implements [`Container`] as well, so proxies can
//! be layered over other proxies.

use crate::Result;
use fieldproxy_path::{Path, is_container};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Something holding named fields that a proxy can delegate to.
///
/// Every method takes `&self`: containers are shared handles, captured by
/// each accessor installed over them. Implementations must not hold any
/// internal borrow while calling back into user code.
pub trait Container {
    /// Whether this container can hold fields at all. Accessors over a
    /// container that cannot are inert.
    fn is_object(&self) -> bool;

    /// Names of the fields currently present.
    fn field_names(&self) -> Vec<String>;

    /// Reads the value at `path`; `None` when anything along it is missing.
    fn read_path(&self, path: &Path) -> Option<Value>;

    /// Writes `value` at `path`, creating missing intermediates. Returns
    /// whether the value was stored.
    fn write_path(&self, path: &Path, value: Value) -> bool;

    /// Direct single-field read; separators in `name` are not interpreted.
    fn read_field(&self, name: &str) -> Option<Value> {
        self.read_path(&Path::field(name))
    }

    /// Direct single-field write; separators in `name` are not interpreted.
    fn write_field(&self, name: &str, value: Value) -> bool {
        self.write_path(&Path::field(name), value)
    }
}

/// Shared, mutable JSON data that proxies delegate to.
///
/// Cloning a `Target` clones the handle, not the data: every clone and
/// every proxy built over it observes the same value.
#[derive(Clone)]
pub struct Target {
    data: Rc<RefCell<Value>>,
}

impl Target {
    pub fn new(value: Value) -> Self {
        Self {
            data: Rc::new(RefCell::new(value)),
        }
    }

    /// A target holding an empty object.
    pub fn object() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    /// Parses JSON text into a new target.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Returns a copy of the current data.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        self.data.borrow().clone()
    }

    /// Swaps the data in place, returning the previous value. Proxies built
    /// over this target see the new data on their next access.
    pub fn replace(&self, value: Value) -> Value {
        self.data.replace(value)
    }

    /// Runs `f` with a shared borrow of the data.
    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.data.borrow())
    }

    /// Runs `f` with an exclusive borrow of the data.
    ///
    /// # Panics
    ///
    /// Panics if `f` accesses this target again (directly or through a proxy).
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Value) -> R) -> R {
        f(&mut self.data.borrow_mut())
    }

    /// Whether both handles share the same data.
    #[must_use]
    pub fn ptr_eq(&self, other: &Target) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl Container for Target {
    fn is_object(&self) -> bool {
        self.with(is_container)
    }

    fn field_names(&self) -> Vec<String> {
        self.with(|value| match value {
            Value::Object(map) => map.keys().cloned().collect(),
            Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        })
    }

    fn read_path(&self, path: &Path) -> Option<Value> {
        self.with(|value| fieldproxy_path::get(value, path).cloned())
    }

    fn write_path(&self, path: &Path, value: Value) -> bool {
        self.with_mut(|root| fieldproxy_path::set(root, path, value))
    }
}

impl From<Value> for Target {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target").field(&self.data.borrow()).finish()
    }
}
