//! Property tests for option merging.

use proptest::prelude::*;

use keel::domain::value_objects::{merge_options, OptionMap, OptionValue};

fn option_value() -> impl Strategy<Value = OptionValue> {
    prop_oneof![
        any::<bool>().prop_map(OptionValue::Bool),
        any::<i64>().prop_map(OptionValue::Integer),
        "[a-z0-9./-]{0,12}".prop_map(OptionValue::String),
        proptest::collection::vec("[a-z]{1,4}".prop_map(OptionValue::String), 0..3)
            .prop_map(OptionValue::List),
    ]
}

fn option_map() -> impl Strategy<Value = OptionMap> {
    proptest::collection::btree_map("[a-z]{1,6}", option_value(), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Merging with no overlay, or an empty one, returns the base.
    #[test]
    fn property_empty_overlay_is_identity(base in option_map()) {
        prop_assert_eq!(merge_options(&base, None), base.clone());
        prop_assert_eq!(merge_options(&base, Some(&OptionMap::new())), base);
    }

    /// PROPERTY: Overlay entries win; base entries survive when not overlaid.
    #[test]
    fn property_overlay_wins(base in option_map(), overlay in option_map()) {
        let merged = merge_options(&base, Some(&overlay));

        for (key, value) in &overlay {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &base {
            if !overlay.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        prop_assert!(merged.keys().all(|k| base.contains_key(k) || overlay.contains_key(k)));
    }

    /// PROPERTY: Merging the same overlay twice changes nothing further.
    #[test]
    fn property_merge_is_idempotent(base in option_map(), overlay in option_map()) {
        let once = merge_options(&base, Some(&overlay));
        let twice = merge_options(&once, Some(&overlay));
        prop_assert_eq!(once, twice);
    }
}
