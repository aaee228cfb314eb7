//! Cart pricing: subtotal, coupon discount, tax, total.

use std::collections::BTreeSet;

use serde::Serialize;

use storepilot_catalog::Category;
use storepilot_core::Amount;

use crate::cart::CartLine;

/// Sales tax rate, applied after discounts.
pub const TAX_RATE: f64 = 0.08;

/// Percentage coupon keyed by code.
///
/// `target` is the category the coupon is advertised against. The discount
/// itself is taken from the entire cart subtotal, not just matching lines;
/// the per-line category check is a display concern only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CouponRule {
    pub code: &'static str,
    pub rate: f64,
    pub target: Category,
}

/// Every coupon the store honours.
pub const COUPON_RULES: &[CouponRule] = &[CouponRule {
    code: "ORGANIC15",
    rate: 0.15,
    target: Category::Produce,
}];

/// Look up the rule behind a coupon code.
pub fn rule_for(code: &str) -> Option<&'static CouponRule> {
    COUPON_RULES.iter().find(|rule| rule.code == code)
}

/// Money summary for a cart. Values are unrounded; round for display only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: Amount,
    pub discount: Amount,
    pub tax: Amount,
    pub total: Amount,
}

/// Pure pricing over the current lines and applied coupon codes.
///
/// - subtotal = Σ(unit price × quantity)
/// - discount = subtotal × rate, summed over applied coupon rules
/// - tax = (subtotal − discount) × `TAX_RATE`
/// - total = subtotal − discount + tax
///
/// Codes without a rule contribute nothing. All outputs are non-negative.
pub fn compute_totals(lines: &[CartLine], coupons: &BTreeSet<String>) -> Totals {
    let subtotal: Amount = lines.iter().map(CartLine::line_total).sum();
    let discount: Amount = coupons
        .iter()
        .filter_map(|code| rule_for(code))
        .map(|rule| subtotal.scale(rule.rate))
        .sum();
    let taxable = subtotal.saturating_sub(discount);
    let tax = taxable.scale(TAX_RATE);
    let total = taxable + tax;
    Totals {
        subtotal,
        discount,
        tax,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storepilot_catalog::ProductId;

    fn line(id: &str, price: f64, quantity: u32, category: Category) -> CartLine {
        CartLine {
            product_id: ProductId::from(id),
            name: format!("Product {id}"),
            unit_price: Amount::from_dollars(price),
            category,
            quantity,
        }
    }

    fn organic15() -> BTreeSet<String> {
        BTreeSet::from(["ORGANIC15".to_string()])
    }

    fn assert_close(actual: Amount, expected: f64) {
        assert!(
            (actual.value() - expected).abs() < 1e-9,
            "expected {expected}, got {}",
            actual.value()
        );
    }

    #[test]
    fn worked_example_from_the_demo_cart() {
        // Milk 3.48×1, bread 1.98×2, apples 2.48×1 with ORGANIC15 applied.
        let lines = vec![
            line("1", 3.48, 1, Category::Dairy),
            line("2", 1.98, 2, Category::Bakery),
            line("5", 2.48, 1, Category::Produce),
        ];
        let totals = compute_totals(&lines, &organic15());

        assert_close(totals.subtotal, 9.92);
        assert_close(totals.discount, 1.488);
        assert_close(totals.tax, 0.674_56);
        assert_close(totals.total, 9.106_56);
        assert_eq!(totals.total.rounded(), 9.11);
    }

    #[test]
    fn no_coupon_means_no_discount() {
        let lines = vec![line("5", 2.48, 3, Category::Produce)];
        let totals = compute_totals(&lines, &BTreeSet::new());
        assert_eq!(totals.discount, Amount::ZERO);
        assert_close(totals.tax, 7.44 * 0.08);
    }

    // Known behavior: ORGANIC15 is advertised against Produce, but the
    // discount comes off the entire subtotal regardless of line categories.
    // Asserted here so a change to that behavior is a visible, deliberate one.
    #[test]
    fn organic15_discounts_the_entire_subtotal_not_only_produce_lines() {
        let lines = vec![
            line("1", 3.48, 1, Category::Dairy),
            line("4", 8.97, 1, Category::Meat),
        ];
        let totals = compute_totals(&lines, &organic15());
        assert_close(totals.discount, 12.45 * 0.15);
    }

    #[test]
    fn unknown_codes_contribute_nothing() {
        let lines = vec![line("2", 1.98, 1, Category::Bakery)];
        let coupons = BTreeSet::from(["SAVE99".to_string()]);
        let totals = compute_totals(&lines, &coupons);
        assert_eq!(totals.discount, Amount::ZERO);
    }

    #[test]
    fn empty_cart_totals_are_all_zero() {
        let totals = compute_totals(&[], &organic15());
        assert_eq!(totals.subtotal, Amount::ZERO);
        assert_eq!(totals.discount, Amount::ZERO);
        assert_eq!(totals.tax, Amount::ZERO);
        assert_eq!(totals.total, Amount::ZERO);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_line() -> impl Strategy<Value = CartLine> {
            (
                "[a-z0-9]{1,8}",
                0.01f64..100.0,
                1u32..20,
                prop_oneof![
                    Just(Category::Dairy),
                    Just(Category::Bakery),
                    Just(Category::Meat),
                    Just(Category::Produce),
                ],
            )
                .prop_map(|(id, price, quantity, category)| CartLine {
                    product_id: ProductId::new(id.clone()),
                    name: id,
                    unit_price: Amount::from_dollars(price),
                    category,
                    quantity,
                })
        }

        proptest! {
            /// subtotal is exactly the sum of line totals.
            #[test]
            fn subtotal_is_sum_of_line_totals(lines in prop::collection::vec(arb_line(), 0..12)) {
                let totals = compute_totals(&lines, &BTreeSet::new());
                let expected: f64 = lines
                    .iter()
                    .map(|l| l.unit_price.value() * f64::from(l.quantity))
                    .sum();
                prop_assert!((totals.subtotal.value() - expected).abs() < 1e-9);
            }

            /// total = subtotal − discount + tax, with discount ≤ subtotal,
            /// for any cart and any coupon combination.
            #[test]
            fn totals_satisfy_the_pricing_identities(
                lines in prop::collection::vec(arb_line(), 0..12),
                with_coupon in any::<bool>(),
            ) {
                let coupons = if with_coupon { organic15() } else { BTreeSet::new() };
                let totals = compute_totals(&lines, &coupons);

                prop_assert!(totals.discount.value() <= totals.subtotal.value() + 1e-9);
                let taxable = totals.subtotal.value() - totals.discount.value();
                prop_assert!((totals.tax.value() - taxable * TAX_RATE).abs() < 1e-9);
                prop_assert!((totals.total.value() - (taxable + totals.tax.value())).abs() < 1e-9);
                prop_assert!(totals.total.value() >= -1e-9);
            }

            /// With ORGANIC15 applied, discount is exactly 15% of the subtotal
            /// whatever the category mix.
            #[test]
            fn organic15_rate_is_flat_over_the_subtotal(
                lines in prop::collection::vec(arb_line(), 1..12),
            ) {
                let totals = compute_totals(&lines, &organic15());
                prop_assert!(
                    (totals.discount.value() - totals.subtotal.value() * 0.15).abs() < 1e-9
                );
            }
        }
    }
}
