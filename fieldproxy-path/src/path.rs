//! Parsed access paths.
//!
//! Syntax accepted by [`Path::parse`]:
//!
//! - FieldName: `name`, separated by `.`, e.g. `engine.power`
//! - ListIndex: `[word]`, e.g. `items[0]`; decimal words without a leading
//!   zero are indices, other words (`[id]`, `[007]`) are field names
//!
//! A single leading `.` is ignored. Bracket groups whose contents are not a
//! plain word (ASCII letters, digits, `_`) are kept as literal text.

use crate::Segment;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An ordered list of [`Segment`]s addressing a value inside a JSON tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parses a dotted/bracket access string. Never fails.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Parser::new(input).run()
    }

    /// A single-segment path addressing `name` verbatim.
    ///
    /// Dots and brackets inside `name` are not interpreted.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Key(name.into())],
        }
    }

    /// Builds a path from already-split segments.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Splits off the first segment, returning it and the remaining path.
    #[must_use]
    pub fn split_first(&self) -> Option<(&Segment, Path)> {
        self.segments
            .split_first()
            .map(|(head, rest)| (head, Path::from_segments(rest.to_vec())))
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    /// Returns a new path with `other` appended.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }
}

/// Canonical dotted/bracket form. Lossy for keys that contain separators.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, Segment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::parse(s)
    }
}

/// Serialized as the display string when that parses back to the same path,
/// otherwise as a list of segments (keys as strings, indices as numbers).
/// Keys holding `.` or `[`, and empty keys in leading position, need the
/// list form.
impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.to_string();
        if Path::parse(&text) == *self {
            serializer.serialize_str(&text)
        } else {
            serializer.collect_seq(&self.segments)
        }
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Segments(Vec<Segment>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(text) => Path::parse(&text),
            Repr::Segments(segments) => Path::from_segments(segments),
        })
    }
}

// -----------------------------------------------------------------------------
// Parser

struct Parser<'a> {
    input: &'a str,
    segments: Vec<Segment>,
    current: String,
    // `current` holds exactly one bracket word and nothing else.
    bracketed: bool,
    at_start: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            segments: Vec::new(),
            current: String::new(),
            bracketed: false,
            at_start: true,
        }
    }

    fn run(mut self) -> Path {
        let input = self.input;
        let mut rest = input;
        while let Some(c) = rest.chars().next() {
            match c {
                '.' => {
                    self.boundary();
                    rest = &rest[1..];
                }
                '[' => match bracket_word(rest) {
                    Some(word) => {
                        self.boundary();
                        self.current.push_str(word);
                        self.bracketed = true;
                        self.at_start = false;
                        rest = &rest[word.len() + 2..];
                    }
                    None => {
                        self.push_char('[');
                        rest = &rest[1..];
                    }
                },
                _ => {
                    self.push_char(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        self.finish_piece();
        Path {
            segments: self.segments,
        }
    }

    fn push_char(&mut self, c: char) {
        self.current.push(c);
        self.bracketed = false;
        self.at_start = false;
    }

    fn boundary(&mut self) {
        if self.at_start && self.current.is_empty() {
            // leading separator
            self.at_start = false;
            return;
        }
        self.finish_piece();
    }

    fn finish_piece(&mut self) {
        let piece = std::mem::take(&mut self.current);
        let segment = if self.bracketed {
            Segment::from_word(&piece)
        } else {
            Segment::Key(piece)
        };
        self.segments.push(segment);
        self.bracketed = false;
        self.at_start = false;
    }
}

/// Returns the word of a `[word]` group at the start of `s`, if it is one.
fn bracket_word(s: &str) -> Option<&str> {
    let body = s.strip_prefix('[')?;
    let end = body.find(']')?;
    let word = &body[..end];
    if !word.is_empty() && word.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        Some(word)
    } else {
        None
    }
}
