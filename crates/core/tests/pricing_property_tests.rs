//! Property-based tests for the side cart pricing rules.
//!
//! These tests verify that the calculator and the discount store keep their
//! guarantees across random inputs, using `proptest` for case generation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use sidecart_core::pricing::{compute_onetime_total, summarize};
use sidecart_core::{
    AmountFormat, Applicability, Discount, DiscountAmount, DiscountEditor, DiscountStore,
    NewDiscount, PricingConfig,
};

// =============================================================================
// Generators
// =============================================================================

/// Amounts in cents up to 10 000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Any non-negative `Decimal`, up to `Decimal::MAX`.
fn arb_unbounded_amount() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
}

fn arb_format() -> impl Strategy<Value = AmountFormat> {
    prop_oneof![Just(AmountFormat::Percent), Just(AmountFormat::FixedCurrency)]
}

fn arb_applicability() -> impl Strategy<Value = Applicability> {
    prop_oneof![
        3 => Just(Applicability::OneTime),
        1 => (1u32..=12).prop_map(Applicability::monthly),
    ]
}

fn arb_discount_amount() -> impl Strategy<Value = DiscountAmount> {
    (arb_format(), arb_amount()).prop_map(|(format, value)| DiscountAmount::new(format, value))
}

/// A collection of predefined discounts with unique ids.
fn arb_discounts(max_count: usize) -> impl Strategy<Value = Vec<Discount>> {
    proptest::collection::vec(
        (arb_format(), arb_amount(), arb_applicability(), any::<bool>()),
        0..=max_count,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (amount_format, amount_value, applicability, is_enabled))| Discount {
                id: format!("discount-{}", i + 1),
                name: format!("Discount {}", i + 1),
                amount_format,
                amount_value,
                is_editable_value: false,
                is_user_created: false,
                is_enabled,
                applicability,
                description: None,
            })
            .collect()
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Without discounts the one-time total is the base price.
    #[test]
    fn prop_no_discounts_keeps_base_price(base in arb_amount()) {
        prop_assert_eq!(compute_onetime_total(base, Vec::new()).unwrap(), base);
    }

    /// The reduction is the sum of the reductions each discount gives on its
    /// own against the base price.
    #[test]
    fn prop_reductions_are_additive(
        base in arb_amount(),
        amounts in proptest::collection::vec(arb_discount_amount(), 0..8),
    ) {
        let expected: Decimal = amounts.iter().map(|a| a.reduction(base).unwrap()).sum();
        prop_assert_eq!(
            base - compute_onetime_total(base, amounts.clone()).unwrap(),
            expected
        );
    }

    /// The order discounts are listed in does not change the total.
    #[test]
    fn prop_total_ignores_order(
        base in arb_amount(),
        amounts in proptest::collection::vec(arb_discount_amount(), 0..8),
    ) {
        let mut reversed = amounts.clone();
        reversed.reverse();
        prop_assert_eq!(
            compute_onetime_total(base, amounts).unwrap(),
            compute_onetime_total(base, reversed).unwrap()
        );
    }

    /// Toggling any discount twice gives back the same store and totals.
    #[test]
    fn prop_double_toggle_is_identity(
        discounts in arb_discounts(10).prop_filter("needs a discount", |d| !d.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let config = PricingConfig::default();
        let store = DiscountStore::new(discounts).unwrap();
        let id = store.discounts()[pick.index(store.len())].id.clone();

        let twice = store
            .toggle_enabled(&id)
            .and_then(|s| s.toggle_enabled(&id))
            .unwrap();
        prop_assert_eq!(&twice, &store);
        prop_assert_eq!(
            summarize(&config, twice.discounts()).unwrap(),
            summarize(&config, store.discounts()).unwrap()
        );
    }

    /// Enabling a second monthly discount after an active one changes nothing.
    #[test]
    fn prop_only_first_monthly_discount_counts(
        discounts in arb_discounts(10),
        format in arb_format(),
        value in arb_amount(),
        months in 1u32..=12,
    ) {
        let config = PricingConfig::default();
        let has_active_monthly = discounts
            .iter()
            .any(|d| d.is_enabled && d.is_monthly() && d.active_duration_months().is_some());
        prop_assume!(has_active_monthly);

        let before = summarize(&config, &discounts).unwrap();
        let mut extended = discounts.clone();
        extended.push(Discount {
            id: "discount-extra".to_string(),
            name: "Extra".to_string(),
            amount_format: format,
            amount_value: value,
            is_editable_value: false,
            is_user_created: false,
            is_enabled: true,
            applicability: Applicability::monthly(months),
            description: None,
        });
        prop_assert_eq!(summarize(&config, &extended).unwrap(), before);
    }

    /// Adding a manual discount and removing it again restores the collection.
    #[test]
    fn prop_add_then_remove_restores_store(
        discounts in arb_discounts(10),
        format in arb_format(),
        value in arb_amount(),
        applicability in arb_applicability(),
    ) {
        let store = DiscountStore::new(discounts).unwrap();
        let added = store
            .add_user_discount(NewDiscount {
                id: None,
                amount_format: format,
                amount_value: value,
                applicability,
                description: None,
            })
            .unwrap();
        let id = added.discounts().last().unwrap().id.clone();

        prop_assert_eq!(added.remove_user_discount(&id).unwrap(), store);
    }

    /// No schedule split exists without discount months.
    #[test]
    fn prop_no_monthly_discount_means_flat_schedule(discounts in arb_discounts(10)) {
        let config = PricingConfig::default();
        let summary = summarize(&config, &discounts).unwrap();
        if summary.discount_months == 0 {
            prop_assert_eq!(summary.discounted_monthly, summary.normal_monthly);
        } else {
            prop_assert!(summary.discount_months <= config.term_months);
        }
    }

    /// Amounts anywhere in the `Decimal` range yield a total or an error.
    #[test]
    fn prop_unbounded_amounts_never_panic(
        base in arb_unbounded_amount(),
        amounts in proptest::collection::vec(
            (arb_format(), arb_unbounded_amount())
                .prop_map(|(format, value)| DiscountAmount::new(format, value)),
            0..4,
        ),
    ) {
        if let Ok(total) = compute_onetime_total(base, amounts.clone()) {
            prop_assert!(total <= base);
        }
    }

    /// Any typed amount leaves the editor usable, and a confirmable draft
    /// is always within the cap.
    #[test]
    fn prop_editor_accepts_any_amount_text(
        value in arb_unbounded_amount(),
        format in arb_format(),
    ) {
        let config = PricingConfig::default();
        let store = DiscountStore::default();
        let mut editor = DiscountEditor::for_new_discount(&config, &store);
        editor.set_amount_format(format).unwrap();
        editor.set_amount_input(&value.to_string());

        if editor.can_confirm() {
            prop_assert!(value <= config.limits.max_for(format));
            prop_assert!(editor.preview_total().is_some());
        } else {
            prop_assert!(editor.error().is_some());
        }
    }
}
