//! # Bonus Utilities
//!
//! Small standalone answers printed after the statistics: a recursive
//! linear search, binary-to-decimal conversion and a Fibonacci sum.
//! None of them share state with the statistics engine.

use crate::CoreError;
use crate::primitives::MAX_BINARY_WIDTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// RECURSIVE SEARCH
// =============================================================================

/// Index of the first element equal to `target`, scanning left to right.
///
/// Implemented by recursion on the tail of the slice, so recursion depth
/// equals the index of the match. Returns `None` when nothing matches,
/// including for an empty slice.
pub fn recursive_search<T: PartialEq>(items: &[T], target: &T) -> Option<usize> {
    search_from(items, target, 0)
}

fn search_from<T: PartialEq>(items: &[T], target: &T, index: usize) -> Option<usize> {
    let (head, tail) = items.split_first()?;
    if head == target {
        Some(index)
    } else {
        search_from(tail, target, index.saturating_add(1))
    }
}

// =============================================================================
// BINARY WORD
// =============================================================================

/// A fixed-width binary number, e.g. `0110`.
///
/// Leading zeros are part of the word: `0011` and `11` have the same value
/// but different widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryWord {
    value: u64,
    width: usize,
}

impl BinaryWord {
    /// Keep the lowest `width` bits of `bits`.
    pub fn from_bits(bits: u64, width: usize) -> Result<Self, CoreError> {
        if width == 0 || width > MAX_BINARY_WIDTH {
            return Err(CoreError::BinaryWidth(width));
        }
        let mask = u64::MAX >> (MAX_BINARY_WIDTH - width);
        Ok(Self {
            value: bits & mask,
            width,
        })
    }

    /// Parse a string of `0` and `1` digits.
    pub fn parse(digits: &str) -> Result<Self, CoreError> {
        let width = digits.chars().count();
        if width == 0 || width > MAX_BINARY_WIDTH {
            return Err(CoreError::BinaryWidth(width));
        }
        let mut value = 0u64;
        for (position, digit) in digits.chars().enumerate() {
            let bit = match digit {
                '0' => 0,
                '1' => 1,
                _ => return Err(CoreError::InvalidBinaryDigit { digit, position }),
            };
            value = (value << 1) | bit;
        }
        Ok(Self { value, width })
    }

    /// Decimal value of the word.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The word as binary digits, zero-padded to its width.
    #[must_use]
    pub fn digits(&self) -> String {
        format!("{:0width$b}", self.value, width = self.width)
    }
}

impl fmt::Display for BinaryWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits())
    }
}

impl FromStr for BinaryWord {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// FIBONACCI
// =============================================================================

/// Sum of the first `terms` Fibonacci numbers, starting `0, 1, 1, 2, ...`.
///
/// Returns `None` if the sum does not fit in a `u64`.
pub fn fibonacci_sum(terms: usize) -> Option<u64> {
    let (mut current, mut next) = (0u64, 1u64);
    let mut sum = 0u64;
    for remaining in (0..terms).rev() {
        sum = sum.checked_add(current)?;
        if remaining > 0 {
            (current, next) = (next, current.checked_add(next)?);
        }
    }
    Some(sum)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn search_finds_first_match() {
        let numbers = [1, 5, 8, 12, 15, 20, 25];
        assert_eq!(recursive_search(&numbers, &15), Some(4));
        assert_eq!(recursive_search(&numbers, &1), Some(0));
        assert_eq!(recursive_search(&numbers, &25), Some(6));
    }

    #[test]
    fn search_returns_leftmost_duplicate() {
        assert_eq!(recursive_search(&[3, 7, 7, 7], &7), Some(1));
    }

    #[test]
    fn search_misses() {
        let empty: [i64; 0] = [];
        assert_eq!(recursive_search(&empty, &7), None);
        assert_eq!(recursive_search(&[1, 2, 3], &9), None);
    }

    #[test]
    fn binary_parse_and_value() {
        let word = BinaryWord::parse("1011").unwrap();
        assert_eq!(word.value(), 11);
        assert_eq!(word.width(), 4);
        assert_eq!(word.to_string(), "1011");

        let padded: BinaryWord = "0010".parse().unwrap();
        assert_eq!(padded.value(), 2);
        assert_eq!(padded.digits(), "0010");
    }

    #[test]
    fn binary_rejects_bad_input() {
        assert_eq!(BinaryWord::parse(""), Err(CoreError::BinaryWidth(0)));
        assert_eq!(
            BinaryWord::parse("10a1"),
            Err(CoreError::InvalidBinaryDigit {
                digit: 'a',
                position: 2
            })
        );
        assert!(BinaryWord::parse(&"1".repeat(65)).is_err());
    }

    #[test]
    fn binary_from_bits_masks_to_width() {
        let word = BinaryWord::from_bits(0b1111_0110, 4).unwrap();
        assert_eq!(word.value(), 6);
        assert_eq!(word.digits(), "0110");

        let full = BinaryWord::from_bits(u64::MAX, 64).unwrap();
        assert_eq!(full.value(), u64::MAX);

        assert!(BinaryWord::from_bits(1, 0).is_err());
    }

    #[test]
    fn fibonacci_first_fifty() {
        assert_eq!(fibonacci_sum(50), Some(20_365_011_073));
    }

    #[test]
    fn fibonacci_small_cases() {
        assert_eq!(fibonacci_sum(0), Some(0));
        assert_eq!(fibonacci_sum(1), Some(0));
        assert_eq!(fibonacci_sum(2), Some(1));
        assert_eq!(fibonacci_sum(5), Some(7));
    }

    #[test]
    fn fibonacci_overflow_is_none() {
        assert_eq!(fibonacci_sum(200), None);
    }

    proptest! {
        #[test]
        fn four_bit_words_roundtrip_digits(bits in 0u64..16) {
            let word = BinaryWord::from_bits(bits, 4).unwrap();
            let parsed = BinaryWord::parse(&word.digits()).unwrap();
            prop_assert_eq!(parsed, word);
            prop_assert_eq!(u64::from_str_radix(&word.digits(), 2).unwrap(), bits);
        }

        #[test]
        fn search_agrees_with_position(items in prop::collection::vec(0i64..10, 0..30), target in 0i64..10) {
            prop_assert_eq!(
                recursive_search(&items, &target),
                items.iter().position(|x| *x == target)
            );
        }
    }
}
