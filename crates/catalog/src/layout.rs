use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::product::AisleCode;

/// A section of the store floor with map coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSection {
    pub aisle: AisleCode,
    pub section: String,
    pub x: i32,
    pub y: i32,
}

/// Aisle code → floor section lookup, consumed by navigation display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLayout {
    sections: BTreeMap<AisleCode, StoreSection>,
}

impl StoreLayout {
    pub fn new(sections: Vec<StoreSection>) -> Self {
        Self {
            sections: sections
                .into_iter()
                .map(|s| (s.aisle.clone(), s))
                .collect(),
        }
    }

    pub fn section(&self, aisle: &AisleCode) -> Option<&StoreSection> {
        self.sections.get(aisle)
    }

    pub fn sections(&self) -> impl Iterator<Item = &StoreSection> {
        self.sections.values()
    }
}
