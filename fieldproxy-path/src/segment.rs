use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A single step within a [`Path`](crate::Path).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// A named field, e.g. the `power` of `engine.power`.
    Key(String),
    /// A bracketed list index, e.g. the `0` of `items[0]`.
    Index(usize),
}

impl Segment {
    /// Builds a segment from bracket contents: canonical decimal words
    /// become indices, anything else (including `007`) a key.
    pub(crate) fn from_word(word: &str) -> Self {
        match parse_index(word) {
            Some(index) => Self::Index(index),
            None => Self::Key(word.to_string()),
        }
    }

    /// Returns the segment as an object key.
    pub fn key(&self) -> String {
        match self {
            Self::Key(key) => key.clone(),
            Self::Index(index) => index.to_string(),
        }
    }

    /// Returns the segment as a list index, if it can be one.
    ///
    /// Canonical decimal keys index lists the same way bracketed indices
    /// do, so `items.0` and `items[0]` reach the same element. `"01"` is a
    /// plain key and never indexes.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(key) => parse_index(key),
        }
    }

    /// Looks this segment up inside `node`.
    pub fn lookup<'v>(&self, node: &'v Value) -> Option<&'v Value> {
        match node {
            Value::Object(map) => match self {
                Self::Key(key) => map.get(key),
                Self::Index(index) => map.get(&index.to_string()),
            },
            Value::Array(items) => self.index().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Mutable counterpart of [`Segment::lookup`].
    pub fn lookup_mut<'v>(&self, node: &'v mut Value) -> Option<&'v mut Value> {
        match node {
            Value::Object(map) => match self {
                Self::Key(key) => map.get_mut(key),
                Self::Index(index) => map.get_mut(&index.to_string()),
            },
            Value::Array(items) => self.index().and_then(move |i| items.get_mut(i)),
            _ => None,
        }
    }
}

/// `"0"` or digits without a leading zero.
fn parse_index(word: &str) -> Option<usize> {
    let canonical = match word.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    };
    if canonical { word.parse().ok() } else { None }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

// Keys serialize as strings and indices as numbers.
impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Key(key) => serializer.serialize_str(key),
            Self::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl<'de> Deserialize<'de> for Segment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(usize),
            Key(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Index(index) => Self::Index(index),
            Repr::Key(key) => Self::Key(key),
        })
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}
