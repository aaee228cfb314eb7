use serde_json::json;

use storepilot_catalog::Catalog;

use crate::reply::Reply;
use crate::rules::{SCRIPTED_RULES, TriggerRule, fallback_reply};

/// Ordered keyword-rule responder with a generic fallback.
#[derive(Debug, Clone, Copy)]
pub struct Responder {
    rules: &'static [TriggerRule],
}

impl Responder {
    pub fn new(rules: &'static [TriggerRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [TriggerRule] {
        self.rules
    }

    /// Case-insensitive, first-match-wins rule dispatch.
    ///
    /// Total over any input: unmatched text falls through to the generic
    /// reply. Pure — no state, no side effects.
    pub fn respond(&self, input: &str, catalog: &Catalog) -> Reply {
        let needle = input.to_lowercase();
        for rule in self.rules {
            if let Some(trigger) = rule.matched_trigger(&needle) {
                return (rule.respond)(catalog)
                    .with_metadata(json!({ "rule": rule.name, "trigger": trigger }));
            }
        }
        fallback_reply(catalog).with_metadata(json!({ "rule": "fallback" }))
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(SCRIPTED_RULES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storepilot_catalog::fixtures::sample_catalog;

    fn rule_name(reply: &Reply) -> String {
        reply.metadata["rule"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn milk_questions_hit_the_milk_rule() {
        let catalog = sample_catalog();
        let reply = Responder::default().respond("Where is the milk?", &catalog);
        assert_eq!(rule_name(&reply), "milk");
        assert!(reply.content.contains("Great Value Whole Milk"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = sample_catalog();
        let reply = Responder::default().respond("SALE today?", &catalog);
        assert_eq!(rule_name(&reply), "deals");
    }

    #[test]
    fn unmatched_input_falls_back() {
        let catalog = sample_catalog();
        let reply = Responder::default().respond("asdf", &catalog);
        assert_eq!(rule_name(&reply), "fallback");
        assert_eq!(
            reply.suggestions,
            vec!["Find a product", "Check my cart", "Show store map", "Apply coupons"]
        );
    }

    #[test]
    fn rule_order_decides_ties() {
        // "milk" is checked before "sale", so a question about both answers
        // about milk.
        let catalog = sample_catalog();
        let reply = Responder::default().respond("is milk on sale?", &catalog);
        assert_eq!(rule_name(&reply), "milk");
    }

    #[test]
    fn produce_synonyms_all_trigger_the_produce_rule() {
        let catalog = sample_catalog();
        for input in ["where is produce?", "fresh fruits", "any vegetables"] {
            let reply = Responder::default().respond(input, &catalog);
            assert_eq!(rule_name(&reply), "produce", "input {input:?}");
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// respond is total: any input produces a non-empty reply with
            /// exactly four suggestions.
            #[test]
            fn respond_is_total(input in ".{0,64}") {
                let catalog = sample_catalog();
                let reply = Responder::default().respond(&input, &catalog);
                prop_assert!(!reply.content.is_empty());
                prop_assert_eq!(reply.suggestions.len(), 4);
            }

            /// Any input containing "milk" (any casing) resolves to the milk
            /// rule — it is first in the list.
            #[test]
            fn milk_always_wins(prefix in "[a-zA-Z ]{0,16}", suffix in "[a-zA-Z ]{0,16}") {
                let catalog = sample_catalog();
                let input = format!("{prefix}MiLk{suffix}");
                let reply = Responder::default().respond(&input, &catalog);
                prop_assert_eq!(reply.metadata["rule"].as_str(), Some("milk"));
            }
        }
    }
}
