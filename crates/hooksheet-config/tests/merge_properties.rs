//! Property-based tests for layer merging

use hooksheet_config::{ConfigLayer, SheetConfig};
use proptest::prelude::*;

fn arb_layer() -> impl Strategy<Value = ConfigLayer> {
    (
        prop::option::of(1u64..10_000),
        prop::option::of(1u64..1_000),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop_oneof![
            Just("trace".to_string()),
            Just("debug".to_string()),
            Just("warn".to_string()),
        ]),
    )
        .prop_map(|(copy_ack_ms, tick_ms, mouse, show_numbers, log_level)| ConfigLayer {
            copy_ack_ms,
            tick_ms,
            mouse,
            show_numbers,
            log_level,
            ..ConfigLayer::default()
        })
}

proptest! {
    #[test]
    fn prop_set_fields_win_and_unset_fields_keep_lower_value(
        lower in arb_layer(),
        upper in arb_layer(),
    ) {
        let base = SheetConfig::default().merge(lower);
        let merged = base.clone().merge(upper.clone());

        prop_assert_eq!(merged.copy_ack_ms, upper.copy_ack_ms.unwrap_or(base.copy_ack_ms));
        prop_assert_eq!(merged.tick_ms, upper.tick_ms.unwrap_or(base.tick_ms));
        prop_assert_eq!(merged.mouse, upper.mouse.unwrap_or(base.mouse));
        prop_assert_eq!(merged.show_numbers, upper.show_numbers.unwrap_or(base.show_numbers));
        prop_assert_eq!(
            merged.log_level,
            upper.log_level.unwrap_or(base.log_level)
        );
    }

    #[test]
    fn prop_empty_layer_is_identity(layer in arb_layer()) {
        let config = SheetConfig::default().merge(layer);
        prop_assert_eq!(config.clone().merge(ConfigLayer::default()), config);
    }
}
