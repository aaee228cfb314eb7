//! `storepilot-profile`
//!
//! **Responsibility:** the loyalty member record and tier math.

pub mod loyalty;
pub mod shopper;

pub use loyalty::{PLATINUM_THRESHOLD, Tier};
pub use shopper::{Shopper, sample_shopper};
