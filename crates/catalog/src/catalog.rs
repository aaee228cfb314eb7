use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};

/// Ordered, immutable product catalog.
///
/// Order is the feed order; iteration and search preserve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Case-insensitive substring match on product names.
    pub fn search(&self, name_fragment: &str) -> Vec<&Product> {
        let needle = name_fragment.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::sample_catalog;
    use crate::product::ProductId;

    #[test]
    fn get_finds_products_by_id() {
        let catalog = sample_catalog();
        let milk = catalog.get(&ProductId::from("1")).unwrap();
        assert_eq!(milk.name, "Great Value Whole Milk");
        assert!(catalog.get(&ProductId::from("999")).is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = sample_catalog();
        let hits = catalog.search("MILK");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ProductId::from("1"));
    }

    #[test]
    fn search_matches_substrings_in_feed_order() {
        let catalog = sample_catalog();
        let organic: Vec<&str> = catalog
            .search("organic")
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(organic, vec!["3", "6"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let catalog = sample_catalog();
        assert_eq!(catalog.search("").len(), catalog.len());
    }
}
