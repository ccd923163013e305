//! Reading and writing JSON values along a [`Path`].

use crate::{Path, Segment};
use serde_json::{Map, Value};
use tracing::trace;

/// How far past the end of a list a write may reach. Writes further out are
/// dropped instead of padding the list with millions of nulls.
const MAX_LIST_GROWTH: usize = 1 << 16;

/// JavaScript-style truthiness: `null`, `false`, `0`, `NaN` and `""` are
/// falsy, everything else (including empty objects and lists) is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether `value` can hold named or indexed children.
#[must_use]
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Resolves `path` inside `root`.
///
/// Returns `None` when `root` is not an object or list, when a falsy node is
/// reached before the path is exhausted, or when any segment is missing.
#[must_use]
pub fn get<'v>(root: &'v Value, path: &Path) -> Option<&'v Value> {
    if !is_container(root) {
        return None;
    }
    let mut node = root;
    for segment in path.segments() {
        if !is_truthy(node) {
            return None;
        }
        node = segment.lookup(node)?;
    }
    Some(node)
}

/// Mutable counterpart of [`get`]. Never creates anything.
#[must_use]
pub fn get_mut<'v>(root: &'v mut Value, path: &Path) -> Option<&'v mut Value> {
    if !is_container(root) {
        return None;
    }
    let mut node = root;
    for segment in path.segments() {
        if !is_truthy(node) {
            return None;
        }
        node = segment.lookup_mut(node)?;
    }
    Some(node)
}

/// Stores `value` at `path` inside `root`, creating missing intermediate
/// objects along the way.
///
/// Missing or falsy intermediates are replaced by empty objects. The write is
/// dropped (returning `false`) when `root` is not an object or list, when an
/// intermediate is a truthy scalar, or when a segment cannot address a list.
pub fn set(root: &mut Value, path: &Path, value: Value) -> bool {
    if !is_container(root) {
        trace!(path = %path, "write dropped: root is not an object");
        return false;
    }
    let Some((last, parents)) = path.segments().split_last() else {
        return false;
    };

    let mut node = root;
    for segment in parents {
        node = match descend_or_create(node, segment) {
            Some(child) => child,
            None => {
                trace!(path = %path, segment = %segment, "write dropped: cannot descend");
                return false;
            }
        };
    }

    match slot(node, last) {
        Some(target) => {
            *target = value;
            true
        }
        None => {
            trace!(path = %path, segment = %last, "write dropped: cannot assign");
            false
        }
    }
}

fn descend_or_create<'v>(node: &'v mut Value, segment: &Segment) -> Option<&'v mut Value> {
    let child = slot(node, segment)?;
    if !is_truthy(child) {
        *child = Value::Object(Map::new());
    }
    if is_container(child) { Some(child) } else { None }
}

/// Returns the child addressed by `segment`, inserting `null` when it is
/// absent. Lists are padded with `null` up to the index.
fn slot<'v>(node: &'v mut Value, segment: &Segment) -> Option<&'v mut Value> {
    match node {
        Value::Object(map) => Some(map.entry(segment.key()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = segment.index()?;
            if index >= items.len() {
                if index - items.len() > MAX_LIST_GROWTH {
                    return None;
                }
                items.resize(index + 1, Value::Null);
            }
            items.get_mut(index)
        }
        _ => None,
    }
}
