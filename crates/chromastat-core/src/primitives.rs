//! # Primitives
//!
//! Fixed constants shared by the core and the binary.

/// Colors recognized by the default recognizer.
pub const DEFAULT_VOCABULARY: [&str; 11] = [
    "RED", "GREEN", "BLUE", "YELLOW", "ORANGE", "BLACK", "WHITE", "BROWN", "PINK", "PURPLE",
    "GRAY",
];

/// Sample data substituted whenever acquisition yields nothing.
///
/// The same fourteen labels, in the same order, on every run.
pub const FALLBACK_LABELS: [&str; 14] = [
    "RED", "GREEN", "BLUE", "RED", "GREEN", "BLUE", "RED", "YELLOW", "BLUE", "RED", "GREEN",
    "RED", "BLUE", "GREEN",
];

/// Label whose probability the report quotes by default.
pub const DEFAULT_TARGET_LABEL: &str = "RED";

/// Widest binary word a `u64` can hold.
pub const MAX_BINARY_WIDTH: usize = 64;

/// Width of the random binary word in the bonus section.
pub const DEFAULT_BINARY_WIDTH: usize = 4;

/// Number of Fibonacci terms summed in the bonus section.
pub const DEFAULT_FIBONACCI_TERMS: usize = 50;

/// Haystack searched in the bonus section.
pub const DEFAULT_SEARCH_HAYSTACK: [i64; 7] = [1, 5, 8, 12, 15, 20, 25];

/// Needle searched for in the bonus section.
pub const DEFAULT_SEARCH_NEEDLE: i64 = 15;

/// Decimal places used when rendering ratios in reports.
pub const REPORT_DECIMALS: u32 = 2;
