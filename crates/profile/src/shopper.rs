use serde::{Deserialize, Serialize};

use storepilot_core::{DomainError, DomainResult, Entity, ShopperId};

/// Loyalty member record.
///
/// The point balance is private so it can only move through `award_points`
/// and `redeem_points`, which keep it non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shopper {
    pub id: ShopperId,
    pub name: String,
    pub email: String,
    loyalty_points: u32,
    /// Product names from past trips, most recent not guaranteed first.
    pub purchase_history: Vec<String>,
    pub preferences: Vec<String>,
}

impl Shopper {
    pub fn new(id: ShopperId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            loyalty_points: 0,
            purchase_history: Vec::new(),
            preferences: Vec::new(),
        }
    }

    pub fn loyalty_points(&self) -> u32 {
        self.loyalty_points
    }

    /// Avatar initials: first letter of each name word.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }

    pub fn award_points(&mut self, points: u32) {
        self.loyalty_points = self.loyalty_points.saturating_add(points);
    }

    /// Spend points. The balance stays non-negative; over-redeeming is
    /// rejected rather than clamped.
    pub fn redeem_points(&mut self, points: u32) -> DomainResult<()> {
        if points > self.loyalty_points {
            return Err(DomainError::validation("not enough loyalty points"));
        }
        self.loyalty_points -= points;
        Ok(())
    }
}

impl Entity for Shopper {
    type Id = ShopperId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Hardcoded sample member standing in for an account service.
pub fn sample_shopper() -> Shopper {
    Shopper {
        id: ShopperId::new(),
        name: "Sarah Johnson".to_string(),
        email: "sarah.johnson@email.com".to_string(),
        loyalty_points: 2450,
        purchase_history: vec![
            "milk".to_string(),
            "bread".to_string(),
            "eggs".to_string(),
            "chicken".to_string(),
            "apples".to_string(),
        ],
        preferences: vec![
            "organic".to_string(),
            "gluten-free".to_string(),
            "dairy".to_string(),
        ],
    }
}
