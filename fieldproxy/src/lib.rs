//! Live field proxies over JSON containers.
//!
//! A [`Proxy`] exposes selected fields of a [`Target`] through accessors that
//! read from and write to the target on every access. Nothing is cached:
//! changes made to the target are visible through the proxy immediately, and
//! writes through the proxy land on the target.
//!
//! - [`Target`] — shared handle owning the data
//! - [`Proxy`] — the facade; [`Proxy::new`] builds one, [`install`] adds
//!   accessors to an existing one
//! - [`FieldSpec`] — which fields to expose: all, a list, or a [`TrapTable`]
//! - [`Trap`] — per-field redirect path or get/set transforms
//!
//! ```
//! use fieldproxy::{Proxy, Target, TrapTable};
//! use serde_json::json;
//!
//! let car = Target::new(json!({"brand": "Peugeot", "engine": {"power": "112hp"}}));
//! let proxy = Proxy::new(
//!     car.clone(),
//!     TrapTable::new().identity("brand").redirect("power", "engine.power"),
//! );
//!
//! assert_eq!(proxy.get("power"), Some(json!("112hp")));
//! proxy.set("power", "75hp");
//! assert_eq!(car.snapshot()["engine"]["power"], "75hp");
//! ```
//!
//! Proxies over a target that is not an object (a string, a number, `null`)
//! are inert rather than an error: their accessors read `None` and drop
//! writes.

mod container;
mod error;
mod field_spec;
mod install;
mod proxy;
mod trap;

pub use container::{Container, Target};
pub use error::{Error, Result};
pub use field_spec::{FieldSpec, TrapTable};
pub use install::{Installed, install};
pub use proxy::Proxy;
pub use trap::{GetFn, SetFn, Trap};

pub use fieldproxy_path::{Path, Segment};
