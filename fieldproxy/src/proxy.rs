use crate::install::Accessor;
use crate::{Container, FieldSpec, Installed, install};
use fieldproxy_path::{Path, is_truthy};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// A facade whose fields are live accessors onto a target container.
///
/// Accessors hold no data of their own: every read goes to the target and
/// every write lands on it. Names without an accessor fall back to plain
/// storage on the proxy itself, which the target never sees.
///
/// `Proxy` is a cheap handle; clones refer to the same facade.
#[derive(Clone, Default)]
pub struct Proxy {
    inner: Rc<ProxyInner>,
}

#[derive(Default)]
struct ProxyInner {
    accessors: RefCell<BTreeMap<String, Rc<Accessor>>>,
    fields: RefCell<Map<String, Value>>,
}

impl Proxy {
    /// Builds a proxy over `target` exposing the fields chosen by `spec`.
    ///
    /// Same as [`install`] on [`Proxy::empty`].
    pub fn new(target: impl Container + 'static, spec: impl Into<FieldSpec>) -> Self {
        let proxy = Self::empty();
        install(&proxy, target, spec);
        proxy
    }

    /// A proxy with no accessors and no plain fields.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Installs accessors onto an existing proxy, keeping whatever else it
    /// already holds. See [`install`].
    pub fn lookup(
        source: &Proxy,
        target: impl Container + 'static,
        spec: impl Into<FieldSpec>,
    ) -> Installed {
        install(source, target, spec)
    }

    /// Reads `name`: through its accessor if it has one, otherwise from
    /// plain storage. `None` means undefined.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.accessor(name) {
            Some(accessor) => accessor.get(self),
            None => self.inner.fields.borrow().get(name).cloned(),
        }
    }

    /// Reads `name` and deserializes it into `T`.
    #[must_use]
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| serde_json::from_value(v).ok())
    }

    /// Writes `name`: through its accessor if it has one, otherwise into
    /// plain storage on the proxy.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        self.store(name, value.into());
    }

    fn store(&self, name: &str, value: Value) -> bool {
        match self.accessor(name) {
            Some(accessor) => accessor.set(self, value),
            None => {
                trace!(field = name, "no accessor, storing on proxy");
                self.inner.fields.borrow_mut().insert(name.to_string(), value);
                true
            }
        }
    }

    /// Whether `name` is backed by an accessor.
    #[must_use]
    pub fn has_accessor(&self, name: &str) -> bool {
        self.inner.accessors.borrow().contains_key(name)
    }

    /// Whether `name` is an accessor or a plain field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.has_accessor(name) || self.inner.fields.borrow().contains_key(name)
    }

    /// Enumerable names: accessors and plain fields, in name order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.accessors.borrow().keys().cloned().collect();
        keys.extend(self.inner.fields.borrow().keys().cloned());
        keys.sort();
        keys.dedup();
        keys
    }

    /// Snapshot of every enumerable field as a JSON object. Undefined
    /// accessor results are left out.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        for key in self.keys() {
            if let Some(value) = self.get(&key) {
                out.insert(key, value);
            }
        }
        Value::Object(out)
    }

    /// Whether both handles refer to the same facade.
    #[must_use]
    pub fn ptr_eq(&self, other: &Proxy) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Defines (or redefines) the accessor for `name`, shadowing any plain
    /// field of that name.
    pub(crate) fn define(&self, name: &str, accessor: Accessor) {
        self.inner.fields.borrow_mut().remove(name);
        self.inner
            .accessors
            .borrow_mut()
            .insert(name.to_string(), Rc::new(accessor));
    }

    // Cloned out so no registry borrow is held while user transforms run.
    fn accessor(&self, name: &str) -> Option<Rc<Accessor>> {
        self.inner.accessors.borrow().get(name).cloned()
    }
}

impl Container for Proxy {
    fn is_object(&self) -> bool {
        true
    }

    fn field_names(&self) -> Vec<String> {
        self.keys()
    }

    fn read_path(&self, path: &Path) -> Option<Value> {
        let Some((head, rest)) = path.split_first() else {
            return Some(self.to_value());
        };
        let value = self.get(&head.key())?;
        if rest.is_empty() {
            return Some(value);
        }
        fieldproxy_path::get(&value, &rest).cloned()
    }

    fn write_path(&self, path: &Path, value: Value) -> bool {
        let Some((head, rest)) = path.split_first() else {
            return false;
        };
        let name = head.key();
        if rest.is_empty() {
            return self.store(&name, value);
        }
        if let Some(accessor) = self.accessor(&name) {
            return accessor.set_within(&rest, value);
        }
        // plain field: edit a copy and store it back
        let mut node = self
            .get(&name)
            .filter(is_truthy)
            .unwrap_or_else(|| Value::Object(Map::new()));
        if !fieldproxy_path::set(&mut node, &rest, value) {
            trace!(path = %path, "write dropped: cannot descend");
            return false;
        }
        self.store(&name, node)
    }
}

impl Serialize for Proxy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("accessors", &self.inner.accessors.borrow().keys().collect::<Vec<_>>())
            .field("fields", &self.inner.fields.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}
