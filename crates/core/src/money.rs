//! Currency amounts.
//!
//! Amounts are kept **unrounded** internally; percentage discounts and tax
//! produce fractional cents on purpose. Rounding to two decimal places is a
//! display concern only (`rounded`, `Display`).

use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Non-negative currency amount in dollars.
///
/// Non-negativity is preserved by construction: callers supply non-negative
/// amounts, and the arithmetic here (`add`, `times`, `scale` with rates in
/// \[0, 1\], `saturating_sub`) cannot go below zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Self = Self(0.0);

    pub const fn from_dollars(dollars: f64) -> Self {
        Self(dollars)
    }

    /// Raw unrounded value.
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Unit price × quantity.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * f64::from(quantity))
    }

    /// Apply a fractional rate (discount percentage, tax rate). Unrounded.
    pub fn scale(self, rate: f64) -> Self {
        Self(self.0 * rate)
    }

    /// Difference clamped at zero; amounts never go negative.
    pub fn saturating_sub(self, other: Self) -> Self {
        Self((self.0 - other.0).max(0.0))
    }

    /// Value rounded to cents, for display only.
    pub fn rounded(self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${:.2}", self.rounded())
    }
}

impl ValueObject for Amount {}
