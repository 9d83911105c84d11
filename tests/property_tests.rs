//! Property-based tests for the map differ and checkpoint ranking
//!
//! - Run with ProptestConfig::with_cases(100)
//! - Must complete in <30 seconds for pre-commit hook

use std::collections::BTreeMap;

use proptest::prelude::*;
use trueno_diff::diff::diff_maps;
use trueno_diff::experiment::{best_checkpoint, Checkpoint, Goal, PrimaryMetric};
use trueno_diff::Value;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Small keys so that random maps overlap often
fn arb_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[a-f]{1,2}", "[0-9]{1,2}", 0..12)
}

/// Two maps with no key in common
fn arb_disjoint_maps() -> impl Strategy<Value = (BTreeMap<String, String>, BTreeMap<String, String>)>
{
    (
        proptest::collection::btree_map("l[a-z]{1,3}", "[0-9]{1,3}", 0..10),
        proptest::collection::btree_map("r[a-z]{1,3}", "[0-9]{1,3}", 0..10),
    )
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        "[ -~]{0,8}".prop_map(Value::String),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: disjoint maps yield |L| + |R| one-sided entries
    #[test]
    fn prop_disjoint_maps_fully_emitted((left, right) in arb_disjoint_maps()) {
        let diff = diff_maps(&left, &right);
        prop_assert_eq!(diff.len(), left.len() + right.len());
        for entry in diff.values() {
            prop_assert!(entry.left().is_some() != entry.right().is_some());
        }
    }

    /// Property: a map never differs from itself
    #[test]
    fn prop_self_diff_empty(map in arb_map()) {
        prop_assert!(diff_maps(&map, &map).is_empty());
    }

    /// Property: swapping the arguments swaps every entry
    #[test]
    fn prop_diff_symmetric(left in arb_map(), right in arb_map()) {
        let forward = diff_maps(&left, &right);
        let backward = diff_maps(&right, &left);
        prop_assert_eq!(forward.len(), backward.len());
        for (key, entry) in forward {
            prop_assert_eq!(Some(&entry.swap()), backward.get(&key));
        }
    }

    /// Property: a key is emitted iff the sides disagree
    #[test]
    fn prop_diff_keys_are_disagreements(left in arb_map(), right in arb_map()) {
        let diff = diff_maps(&left, &right);
        for key in left.keys().chain(right.keys()) {
            let differs = left.get(key) != right.get(key);
            prop_assert_eq!(diff.contains_key(key), differs);
        }
    }

    /// Property: formatting is deterministic
    #[test]
    fn prop_format_deterministic(value in arb_value()) {
        prop_assert_eq!(value.format(), value.clone().format());
    }

    /// Property: the best checkpoint holds the extremal metric value
    #[test]
    fn prop_best_is_extremal(values in proptest::collection::vec(-1000i64..1000, 1..20)) {
        let checkpoints: Vec<Checkpoint> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Checkpoint::builder(format!("c{i:03}"), "e").metric("m", *v).build())
            .collect();

        let max = PrimaryMetric::new("m", Goal::Maximize);
        let best = best_checkpoint(&checkpoints, &max).unwrap();
        prop_assert_eq!(best.metrics()["m"].clone(), Value::Int(*values.iter().max().unwrap()));

        let min = PrimaryMetric::new("m", Goal::Minimize);
        let best = best_checkpoint(&checkpoints, &min).unwrap();
        prop_assert_eq!(best.metrics()["m"].clone(), Value::Int(*values.iter().min().unwrap()));
    }
}
