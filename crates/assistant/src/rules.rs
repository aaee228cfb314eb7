//! The scripted rule set.
//!
//! Rules are data: an ordered list of (trigger substrings, canned response)
//! pairs. Evaluation order is part of the contract — "milk" is checked
//! before everything else, so "is milk on sale?" answers about milk, not
//! about deals. Reply text is fixed fixture wording; the milk count is the
//! only value computed from the live catalog.

use storepilot_catalog::Catalog;

use crate::reply::Reply;

/// One scripted trigger: if any trigger substring occurs in the lowercased
/// user input, `respond` produces the canned reply.
#[derive(Debug, Clone, Copy)]
pub struct TriggerRule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub respond: fn(&Catalog) -> Reply,
}

impl TriggerRule {
    /// The trigger substring that matched, if any. `input` must already be
    /// lowercased.
    pub fn matched_trigger(&self, input: &str) -> Option<&'static str> {
        self.triggers.iter().copied().find(|t| input.contains(t))
    }
}

/// Rules in match order; first match wins.
pub const SCRIPTED_RULES: &[TriggerRule] = &[
    TriggerRule {
        name: "milk",
        triggers: &["milk"],
        respond: milk_reply,
    },
    TriggerRule {
        name: "deals",
        triggers: &["sale", "deals"],
        respond: deals_reply,
    },
    TriggerRule {
        name: "shopping-list",
        triggers: &["list", "shopping list"],
        respond: list_reply,
    },
    TriggerRule {
        name: "produce",
        triggers: &["produce", "fruits", "vegetables"],
        respond: produce_reply,
    },
];

// The quoted example (name, aisle, price, rating) is fixture wording, not
// recomputed from the matched products; only the count is live.
fn milk_reply(catalog: &Catalog) -> Reply {
    let count = catalog.search("milk").len();
    Reply::new(format!(
        "I found {count} milk options for you! Great Value Whole Milk is available in Aisle A12 \
         for $3.48. It's currently in stock and has a 4.5-star rating. Would you like me to \
         guide you there?"
    ))
    .with_suggestions([
        "Navigate to milk",
        "Add to cart",
        "Show alternatives",
        "Check nutrition info",
    ])
}

fn deals_reply(_catalog: &Catalog) -> Reply {
    Reply::new(
        "Here are today's best deals: 🔥 Gala Apples - 20% off ($2.48), Wonder Bread - Buy 2 \
         Get 1 Free, Organic Bananas - $1.98/lb. Plus, you have a personalized 15% off coupon \
         for organic products that expires today!",
    )
    .with_suggestions([
        "Show all deals",
        "Apply my coupons",
        "Navigate to deals",
        "Save for later",
    ])
}

fn list_reply(_catalog: &Catalog) -> Reply {
    Reply::new(
        "Based on your purchase history, I've created a smart list: Milk ✓, Bread, Eggs \
         (currently out of stock - would you like alternatives?), Chicken Breast, and Apples. \
         I can guide you through the store efficiently to collect these items!",
    )
    .with_suggestions([
        "Start guided shopping",
        "Edit list",
        "Check alternatives",
        "Optimize route",
    ])
}

fn produce_reply(_catalog: &Catalog) -> Reply {
    Reply::new(
        "The produce section is in Aisle D2, near the front entrance. Today's fresh picks \
         include organic bananas ($1.98/lb) and Gala apples (20% off!). The section is \
         currently well-stocked and I can guide you there with AR navigation.",
    )
    .with_suggestions([
        "Navigate to produce",
        "Show fresh picks",
        "Check organic options",
        "See weekly specials",
    ])
}

/// Reply for input no rule matched.
pub fn fallback_reply(_catalog: &Catalog) -> Reply {
    Reply::new(
        "I'd be happy to help with that! I can assist you with finding products, checking \
         prices, navigating the store, applying coupons, or answering questions about items. \
         What specific information are you looking for?",
    )
    .with_suggestions([
        "Find a product",
        "Check my cart",
        "Show store map",
        "Apply coupons",
    ])
}

/// Opening assistant message shown before any user input.
pub fn greeting() -> Reply {
    Reply::new(
        "Hi! I'm your in-store shopping assistant. I can help you find products, check \
         prices, get recommendations, or answer any questions about your shopping trip. What \
         can I help you with today?",
    )
    .with_suggestions([
        "Find organic milk",
        "Check my shopping list",
        "What's on sale today?",
        "Navigate to produce section",
    ])
}
