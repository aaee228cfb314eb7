//! Hardcoded sample records standing in for a real catalog service.

use storepilot_core::Amount;

use crate::catalog::Catalog;
use crate::layout::{StoreLayout, StoreSection};
use crate::product::{AisleCode, Category, Product, ProductId};
use crate::recommend::Recommendation;

fn product(
    id: &str,
    name: &str,
    price: f64,
    category: Category,
    aisle: &str,
    in_stock: bool,
    rating: f32,
    description: &str,
) -> Product {
    Product {
        id: ProductId::from(id),
        name: name.to_string(),
        price: Amount::from_dollars(price),
        category,
        aisle: AisleCode::from(aisle),
        in_stock,
        rating,
        description: description.to_string(),
    }
}

/// The six-product demo catalog.
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        product(
            "1",
            "Great Value Whole Milk",
            3.48,
            Category::Dairy,
            "A12",
            true,
            4.5,
            "Fresh whole milk, 1 gallon",
        ),
        product(
            "2",
            "Wonder Bread Classic White",
            1.98,
            Category::Bakery,
            "B8",
            true,
            4.2,
            "Soft white bread, 20 oz loaf",
        ),
        product(
            "3",
            "Organic Free Range Eggs",
            4.97,
            Category::Dairy,
            "A12",
            false,
            4.8,
            "12 count large eggs",
        ),
        product(
            "4",
            "Tyson Chicken Breast",
            8.97,
            Category::Meat,
            "C15",
            true,
            4.3,
            "Boneless skinless chicken breast, 2.5 lbs",
        ),
        product(
            "5",
            "Gala Apples",
            2.48,
            Category::Produce,
            "D2",
            true,
            4.6,
            "Fresh Gala apples, 3 lb bag",
        ),
        product(
            "6",
            "Organic Bananas",
            1.98,
            Category::Produce,
            "D2",
            true,
            4.4,
            "Organic bananas, per lb",
        ),
    ])
}

/// Floor sections for the demo store.
pub fn sample_layout() -> StoreLayout {
    let section = |aisle: &str, name: &str, x: i32, y: i32| StoreSection {
        aisle: AisleCode::from(aisle),
        section: name.to_string(),
        x,
        y,
    };
    StoreLayout::new(vec![
        section("A12", "Dairy", 100, 200),
        section("B8", "Bakery", 200, 150),
        section("C15", "Meat", 300, 250),
        section("D2", "Produce", 150, 100),
    ])
}

/// Static recommendation set shown on the finder tab.
pub fn sample_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation::new("6", "Based on your healthy eating preferences"),
        Recommendation::new("3", "You buy eggs regularly"),
        Recommendation::new("4", "Pairs well with your current cart"),
    ]
}
