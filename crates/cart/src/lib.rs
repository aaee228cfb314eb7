//! `storepilot-cart`
//!
//! **Responsibility:** the shopping cart aggregate and the pricing engine.
//!
//! The cart owns its line items exclusively; lines change only through event
//! application. Pricing is a pure function over the current lines and the
//! applied coupon codes.

pub mod cart;
pub mod pricing;

pub use cart::{
    AddItem, ApplyCoupon, BeginCheckout, Cart, CartCommand, CartEvent, CartId, CartLine,
    CartStatus, CheckoutSettled, CheckoutStarted, CouponApplied, ItemAdded, LineRemoved,
    QuantitySet, SetQuantity, SettleCheckout,
};
pub use pricing::{COUPON_RULES, CouponRule, TAX_RATE, Totals, compute_totals, rule_for};
