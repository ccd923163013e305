//! Path parsing and path walking for JSON values.
//!
//! This crate turns loosely-typed access strings such as `"engine.power"` or
//! `"items[0].name"` into a structured [`Path`], and walks those paths over a
//! [`serde_json::Value`]:
//! - [`Path`] / [`Segment`] — the parsed form (field names and list indices)
//! - [`get`] / [`get_mut`] — read along a path, stopping at the first miss
//! - [`set`] — write along a path, creating missing intermediate objects
//!
//! Parsing is total: any string yields a path. Walking is total too: reads
//! that cannot be resolved return `None`, writes that cannot be applied
//! return `false`. Nothing here panics on malformed input.

mod path;
mod segment;
mod walk;

pub use path::Path;
pub use segment::Segment;
pub use walk::{get, get_mut, is_container, is_truthy, set};
