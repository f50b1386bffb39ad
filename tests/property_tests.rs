//! Property-Based Tests for Design My PC
//!
//! Uses proptest for invariants over arbitrary inputs:
//! - Enum string round-trips (to_string -> parse)
//! - Tier selection is monotonic in budget and always finds a bundle
//! - Slot re-selection never disturbs other slots or the price

use designmypc::logic::resolver::{resolve_structured, StructuredRequest, TierPolicy};
use designmypc::session::BuildSelection;
use designmypc::types::{Slot, Tier, UseCase};
use proptest::prelude::*;

/// Strategy for generating valid UseCase variants
fn use_case_strategy() -> impl Strategy<Value = UseCase> {
    prop_oneof![Just(UseCase::Gaming), Just(UseCase::Workstation)]
}

/// Strategy for generating valid Slot variants
fn slot_strategy() -> impl Strategy<Value = Slot> {
    prop_oneof![
        Just(Slot::Cpu),
        Just(Slot::Gpu),
        Just(Slot::Ram),
        Just(Slot::Storage),
        Just(Slot::Motherboard),
        Just(Slot::Psu),
        Just(Slot::Case),
    ]
}

fn tier_strategy() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::Entry), Just(Tier::Mid), Just(Tier::High)]
}

proptest! {
    /// UseCase: to_string -> parse round-trip is identity
    #[test]
    fn use_case_roundtrip(use_case in use_case_strategy()) {
        let parsed: UseCase = use_case.to_string().parse().expect("Should parse");
        prop_assert_eq!(use_case, parsed);
    }

    /// Tier: to_string -> parse round-trip is identity
    #[test]
    fn tier_roundtrip(tier in tier_strategy()) {
        let parsed: Tier = tier.to_string().parse().expect("Should parse");
        prop_assert_eq!(tier, parsed);
    }

    /// Slot: to_string -> parse round-trip is identity
    #[test]
    fn slot_roundtrip(slot in slot_strategy()) {
        let parsed: Slot = slot.to_string().parse().expect("Should parse");
        prop_assert_eq!(slot, parsed);
    }

    /// Any positive budget resolves, and the bundle matches the request
    #[test]
    fn positive_budget_always_resolves(use_case in use_case_strategy(), budget in 0.01f64..1.0e7) {
        let request = StructuredRequest::new(use_case, budget);
        let rec = resolve_structured(&request, &TierPolicy::default()).unwrap();
        prop_assert_eq!(rec.bundle.use_case, use_case);
        prop_assert_eq!(rec.bundle.tier, rec.tier);
        prop_assert_eq!(rec.price_delta, Some(budget - f64::from(rec.bundle.price)));
    }

    /// A larger budget never yields a lower tier
    #[test]
    fn tier_is_monotonic(a in 0.01f64..10_000.0, b in 0.01f64..10_000.0) {
        let policy = TierPolicy::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(policy.tier_for(low) <= policy.tier_for(high));
    }

    /// Re-selecting one slot leaves every other slot and the price unchanged
    #[test]
    fn reselect_is_local(
        use_case in use_case_strategy(),
        budget in 1.0f64..6000.0,
        slot in slot_strategy(),
        index in 0usize..4,
    ) {
        let request = StructuredRequest::new(use_case, budget);
        let rec = resolve_structured(&request, &TierPolicy::default()).unwrap();
        let mut selection = BuildSelection::new(rec);
        let before: Vec<(Slot, &str)> = selection.chosen_parts().collect();
        let price = selection.price();

        let result = selection.select(slot, index);
        prop_assert_eq!(result.is_ok(), index < selection.options(slot).len());

        prop_assert_eq!(selection.price(), price);
        for (other, part) in before {
            if other != slot {
                prop_assert_eq!(selection.chosen_part(other), part);
            }
        }
    }
}
