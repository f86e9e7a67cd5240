//! # chromastat-core
//!
//! The deterministic logic behind chromastat.
//!
//! This crate turns a document into a sequence of categorical labels and
//! answers descriptive-statistics questions about that sequence:
//!
//! - [`Label`] / [`LabelSequence`]: the immutable data model
//! - [`FrequencyTable`]: label counts derived from one sequence
//! - [`Recognizer`]: extracts labels from HTML table cells
//! - [`StatisticsEngine`]: mode, median, categorical variance, probability
//! - [`Ratio`]: exact fractions, rendered to fixed decimals
//! - [`bonus`]: recursive search, binary words, Fibonacci sums
//! - [`Report`]: the structured run summary
//!
//! ## Constraints
//!
//! - No I/O, no async, no randomness. Callers inject documents and bits.
//! - `BTreeMap` only, so every iteration order is reproducible.
//! - No floating point. Fractional results stay exact until rendering.

pub mod bonus;
pub mod primitives;
pub mod report;

mod frequency;
mod label;
mod ratio;
mod recognizer;
mod stats;

pub use bonus::{BinaryWord, fibonacci_sum, recursive_search};
pub use frequency::FrequencyTable;
pub use label::{Label, LabelSequence, default_target, default_vocabulary, fallback_sequence};
pub use ratio::Ratio;
pub use recognizer::Recognizer;
pub use report::{Analysis, BonusResults, FallbackReason, PersistenceOutcome, Provenance, Report};
pub use stats::{Statistics, StatisticsEngine};

use thiserror::Error;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Errors raised by the core.
///
/// Statistics queries never fail; these cover construction of labels,
/// recognizers and binary words from untrusted input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A label was empty or contained separator characters.
    #[error("Invalid label {0:?}: labels must be non-empty and contain no whitespace or commas")]
    InvalidLabel(String),

    /// A recognizer was built without any labels to recognize.
    #[error("Recognizer vocabulary is empty")]
    EmptyVocabulary,

    /// The cell pattern could not be compiled.
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// A binary string contained something other than `0` or `1`.
    #[error("Invalid binary digit {digit:?} at position {position}")]
    InvalidBinaryDigit { digit: char, position: usize },

    /// A binary word width outside `1..=64`.
    #[error("Binary width {0} out of valid range 1..={max}", max = primitives::MAX_BINARY_WIDTH)]
    BinaryWidth(usize),
}
