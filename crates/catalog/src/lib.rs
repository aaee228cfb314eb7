//! `storepilot-catalog`
//!
//! **Responsibility:** immutable product reference data.
//!
//! The catalog, store layout, and recommendation set are loaded once at
//! process start and never mutated. Nothing in this crate owns mutable
//! state; carts and conversations hold on to ids and snapshots instead.

pub mod catalog;
pub mod fixtures;
pub mod layout;
pub mod product;
pub mod recommend;

pub use catalog::Catalog;
pub use layout::{StoreLayout, StoreSection};
pub use product::{AisleCode, Category, Product, ProductId};
pub use recommend::{Recommendation, recommended};
