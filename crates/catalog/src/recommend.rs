use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::product::{Product, ProductId};

/// Static recommendation: a catalog id plus the display reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: ProductId,
    pub reason: String,
}

impl Recommendation {
    pub fn new(product_id: impl Into<ProductId>, reason: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            reason: reason.into(),
        }
    }
}

/// Resolve recommendations against the catalog by id, preserving
/// recommendation order. Ids that do not resolve are skipped.
pub fn recommended<'a>(
    catalog: &'a Catalog,
    recommendations: &'a [Recommendation],
) -> Vec<(&'a Product, &'a str)> {
    recommendations
        .iter()
        .filter_map(|rec| {
            catalog
                .get(&rec.product_id)
                .map(|product| (product, rec.reason.as_str()))
        })
        .collect()
}
