//! Property-based tests for path parsing and walking.
//!
//! - Canonical form is stable: parse(display(p)) == p for word-key paths
//! - Serde is lossless for any path, including keys holding separators
//! - Writes are readable: get(set(root, p, v), p) == v for key-only paths
//! - Writes never disturb unrelated top-level fields

use fieldproxy_path::{Path, Segment, get, set};
use proptest::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap()
}

/// Keys the parser would split or rewrite: separators, brackets, empty
/// text, zero-padded digits.
fn awkward_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9._\\[\\]-]{0,6}").unwrap()
}

fn segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        3 => key_strategy().prop_map(Segment::Key),
        1 => (0usize..50).prop_map(Segment::Index),
    ]
}

fn any_segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        3 => awkward_key_strategy().prop_map(Segment::Key),
        1 => any::<u32>().prop_map(|n| Segment::Index(n as usize)),
    ]
}

fn path_strategy() -> impl Strategy<Value = Path> {
    (key_strategy(), prop::collection::vec(segment_strategy(), 0..6)).prop_map(|(head, rest)| {
        let mut segments = vec![Segment::Key(head)];
        segments.extend(rest);
        Path::from_segments(segments)
    })
}

fn key_path_strategy() -> impl Strategy<Value = Path> {
    prop::collection::vec(key_strategy(), 1..6)
        .prop_map(|keys| Path::from_segments(keys.into_iter().map(Segment::Key).collect()))
}

fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z ]{0,12}".prop_map(Value::String),
    ]
}

// =============================================================================
// PARSER PROPERTIES
// =============================================================================

proptest! {
    /// Display output parses back into the same path.
    #[test]
    fn display_round_trips(path in path_strategy()) {
        let reparsed = Path::parse(&path.to_string());
        prop_assert_eq!(reparsed, path);
    }

    /// Serde brings back exactly the segments that went in.
    #[test]
    fn serde_round_trips(segments in prop::collection::vec(any_segment_strategy(), 0..6)) {
        let path = Path::from_segments(segments);
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, path);
    }

    /// Parsing never panics, whatever the input.
    #[test]
    fn parse_is_total(input in "\\PC{0,40}") {
        let path = Path::parse(&input);
        prop_assert!(!path.is_empty());
    }
}

// =============================================================================
// WALKER PROPERTIES
// =============================================================================

proptest! {
    /// A value written along a key path is read back unchanged.
    #[test]
    fn set_then_get(path in key_path_strategy(), leaf in leaf_strategy()) {
        let mut root = json!({});
        prop_assert!(set(&mut root, &path, leaf.clone()));
        prop_assert_eq!(get(&root, &path), Some(&leaf));
    }

    /// Writing below one top-level key leaves another untouched.
    #[test]
    fn set_leaves_other_fields_alone(path in key_path_strategy(), leaf in leaf_strategy()) {
        let mut root = json!({"__untouched": "still here"});
        set(&mut root, &path, leaf);
        if path.first() != Some(&Segment::Key("__untouched".into())) {
            prop_assert_eq!(&root["__untouched"], &json!("still here"));
        }
    }
}
