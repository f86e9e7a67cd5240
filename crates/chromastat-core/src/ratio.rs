//! # Ratio
//!
//! Exact non-negative fractions.
//!
//! Variance and probability are ratios of integer counts. Keeping them as
//! reduced fractions makes results reproducible bit for bit; decimals only
//! appear when a ratio is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A reduced fraction `numerator / denominator` with `denominator > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio {
    numerator: u128,
    denominator: u128,
}

impl Ratio {
    /// The ratio `0 / 1`.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// The ratio `1 / 1`.
    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// Create a reduced ratio.
    ///
    /// A zero denominator yields [`Ratio::ZERO`]: every quotient in this
    /// crate is defined as zero when there is nothing to divide by.
    #[must_use]
    pub fn new(numerator: u128, denominator: u128) -> Self {
        if denominator == 0 || numerator == 0 {
            return Self::ZERO;
        }
        let divisor = gcd(numerator, denominator);
        Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        }
    }

    /// Create a ratio from two counts.
    #[must_use]
    pub fn from_counts(numerator: usize, denominator: usize) -> Self {
        Self::new(numerator as u128, denominator as u128)
    }

    #[must_use]
    pub fn numerator(&self) -> u128 {
        self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> u128 {
        self.denominator
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Value scaled by one million, rounded half up.
    #[must_use]
    pub fn millionths(&self) -> u128 {
        self.scaled_rounded(1_000_000)
    }

    /// Render with exactly `decimals` fractional digits, rounded half up.
    ///
    /// `Ratio::new(9, 4).to_fixed(2)` is `"2.25"`.
    #[must_use]
    pub fn to_fixed(&self, decimals: u32) -> String {
        let scale = 10u128.saturating_pow(decimals);
        let scaled = self.scaled_rounded(scale);
        let whole = scaled / scale;
        if decimals == 0 {
            return whole.to_string();
        }
        let fraction = scaled % scale;
        format!("{whole}.{fraction:0width$}", width = decimals as usize)
    }

    /// Render as a percentage with `decimals` fractional digits.
    ///
    /// `Ratio::new(5, 14).percent_fixed(2)` is `"35.71"`.
    #[must_use]
    pub fn percent_fixed(&self, decimals: u32) -> String {
        Self {
            numerator: self.numerator.saturating_mul(100),
            denominator: self.denominator,
        }
        .to_fixed(decimals)
    }

    fn scaled_rounded(&self, scale: u128) -> u128 {
        let scaled = self.numerator.saturating_mul(scale);
        scaled.saturating_add(self.denominator / 2) / self.denominator
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Ratio {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let numerator = self
            .numerator
            .saturating_mul(rhs.denominator)
            .saturating_add(rhs.numerator.saturating_mul(self.denominator));
        Self::new(numerator, self.denominator.saturating_mul(rhs.denominator))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_on_construction() {
        let ratio = Ratio::new(36, 16);
        assert_eq!(ratio.numerator(), 9);
        assert_eq!(ratio.denominator(), 4);
        assert_eq!(ratio, Ratio::new(9, 4));
    }

    #[test]
    fn zero_denominator_is_zero() {
        assert_eq!(Ratio::new(5, 0), Ratio::ZERO);
        assert!(Ratio::from_counts(0, 0).is_zero());
    }

    #[test]
    fn fixed_rendering_rounds_half_up() {
        assert_eq!(Ratio::new(9, 4).to_fixed(2), "2.25");
        assert_eq!(Ratio::new(5, 14).to_fixed(4), "0.3571");
        assert_eq!(Ratio::new(1, 8).to_fixed(2), "0.13");
        assert_eq!(Ratio::new(2, 3).to_fixed(0), "1");
        assert_eq!(Ratio::ZERO.to_fixed(2), "0.00");
    }

    #[test]
    fn percent_rendering() {
        assert_eq!(Ratio::new(5, 14).percent_fixed(2), "35.71");
        assert_eq!(Ratio::ONE.percent_fixed(1), "100.0");
    }

    #[test]
    fn millionths_of_quarter() {
        assert_eq!(Ratio::new(1, 4).millionths(), 250_000);
        assert_eq!(Ratio::new(5, 14).millionths(), 357_143);
    }

    #[test]
    fn addition_reduces() {
        let sum = Ratio::new(1, 6) + Ratio::new(1, 3);
        assert_eq!(sum, Ratio::new(1, 2));
        assert_eq!(Ratio::new(5, 14) + Ratio::new(9, 14), Ratio::ONE);
    }

    #[test]
    fn display_as_fraction() {
        assert_eq!(Ratio::new(10, 4).to_string(), "5/2");
    }
}
