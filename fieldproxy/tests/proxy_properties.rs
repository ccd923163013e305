//! Property-based tests for proxy behaviour.
//!
//! - Write-through: a write via an exposed field is what the target holds
//! - Isolation: writes via unexposed names never reach the target
//! - Liveness: target edits are always what the proxy reads next
//! - Redirect round trip: set then get through any generated path

use fieldproxy::{Path, Proxy, Target, TrapTable};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,6}").unwrap()
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,10}".prop_map(Value::String),
    ]
}

fn object_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(name_strategy(), value_strategy(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn writes_go_through(
        fields in object_strategy(),
        name in name_strategy(),
        value in value_strategy(),
    ) {
        let target = Target::new(Value::Object(fields));
        let proxy = Proxy::new(target.clone(), [name.as_str()]);
        proxy.set(&name, value.clone());
        let snapshot = target.snapshot();
        prop_assert_eq!(snapshot.get(&name), Some(&value));
        prop_assert_eq!(proxy.get(&name), Some(value));
    }

    #[test]
    fn unexposed_writes_stay_on_the_proxy(
        fields in object_strategy(),
        exposed in name_strategy(),
        other in name_strategy(),
        value in value_strategy(),
    ) {
        prop_assume!(exposed != other);
        let target = Target::new(Value::Object(fields));
        let before = target.snapshot();
        let proxy = Proxy::new(target.clone(), [exposed.as_str()]);
        proxy.set(&other, value.clone());
        prop_assert_eq!(target.snapshot(), before);
        prop_assert_eq!(proxy.get(&other), Some(value));
    }

    #[test]
    fn target_edits_are_live(
        fields in object_strategy(),
        value in value_strategy(),
    ) {
        let target = Target::new(Value::Object(fields.clone()));
        let proxy = Proxy::new(target.clone(), ());
        for name in fields.keys() {
            target.with_mut(|v| v[name.as_str()] = value.clone());
            prop_assert_eq!(proxy.get(name), Some(value.clone()));
        }
    }

    #[test]
    fn redirect_round_trips(
        keys in prop::collection::vec(name_strategy(), 1..5),
        value in value_strategy(),
    ) {
        let path = Path::parse(&keys.join("."));
        let target = Target::object();
        let proxy = Proxy::new(target.clone(), TrapTable::new().redirect("alias", path.clone()));
        proxy.set("alias", value.clone());
        prop_assert_eq!(proxy.get("alias"), Some(value.clone()));
        let snapshot = target.snapshot();
        prop_assert_eq!(fieldproxy_path::get(&snapshot, &path), Some(&value));
    }
}
