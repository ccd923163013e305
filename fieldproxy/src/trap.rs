use crate::Proxy;
use fieldproxy_path::Path;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Read transform: receives the proxy and the raw target value, returns the
/// value exposed by the proxy.
pub type GetFn = Rc<dyn Fn(&Proxy, Option<Value>) -> Option<Value>>;

/// Write transform: receives the proxy and the incoming value, returns the
/// value stored on the target.
pub type SetFn = Rc<dyn Fn(&Proxy, Value) -> Value>;

/// Per-field behaviour of a proxy accessor.
///
/// Resolved once when the accessor is installed.
#[derive(Clone, Default)]
pub enum Trap {
    /// Read and write `path` on the target instead of the same-named field.
    Redirect(Path),
    /// Same-named field access passed through optional transforms. A missing
    /// half behaves like [`Trap::Identity`].
    Transform {
        get: Option<GetFn>,
        set: Option<SetFn>,
    },
    /// Same-named field access, no transforms.
    #[default]
    Identity,
}

impl Trap {
    pub fn redirect(path: impl Into<Path>) -> Self {
        Self::Redirect(path.into())
    }

    /// A transform with only a read half.
    pub fn getter(get: impl Fn(&Proxy, Option<Value>) -> Option<Value> + 'static) -> Self {
        Self::Transform {
            get: Some(Rc::new(get)),
            set: None,
        }
    }

    /// A transform with only a write half.
    pub fn setter(set: impl Fn(&Proxy, Value) -> Value + 'static) -> Self {
        Self::Transform {
            get: None,
            set: Some(Rc::new(set)),
        }
    }

    /// A transform with both halves.
    pub fn transform(
        get: impl Fn(&Proxy, Option<Value>) -> Option<Value> + 'static,
        set: impl Fn(&Proxy, Value) -> Value + 'static,
    ) -> Self {
        Self::Transform {
            get: Some(Rc::new(get)),
            set: Some(Rc::new(set)),
        }
    }

    /// Parses a trap out of its JSON form: a string is a redirect path,
    /// `null` or `{}` is identity.
    pub(crate) fn from_json(field: &str, value: &Value) -> crate::Result<Self> {
        match value {
            Value::String(path) => Ok(Self::redirect(path.as_str())),
            Value::Null => Ok(Self::Identity),
            Value::Object(map) if map.is_empty() => Ok(Self::Identity),
            Value::Object(_) => Err(crate::Error::InvalidFieldSpec(format!(
                "trap for `{field}`: transforms cannot be loaded from JSON"
            ))),
            other => Err(crate::Error::InvalidFieldSpec(format!(
                "trap for `{field}` must be a path string or null, got {other}"
            ))),
        }
    }
}

impl fmt::Debug for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redirect(path) => f.debug_tuple("Redirect").field(&path.to_string()).finish(),
            Self::Transform { get, set } => f
                .debug_struct("Transform")
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .finish(),
            Self::Identity => f.write_str("Identity"),
        }
    }
}

impl From<&str> for Trap {
    fn from(path: &str) -> Self {
        Self::redirect(path)
    }
}

impl From<String> for Trap {
    fn from(path: String) -> Self {
        Self::redirect(path)
    }
}

impl From<Path> for Trap {
    fn from(path: Path) -> Self {
        Self::Redirect(path)
    }
}
