//! # Report Module
//!
//! Structured summary of one run.
//!
//! A [`Report`] carries the analysis section, the bonus section, or both.
//! It serializes to JSON as-is and renders to a fixed-order text block.
//! Fallback data is never presented as if it came from the document: the
//! [`Provenance`] travels with the statistics.

use crate::primitives::REPORT_DECIMALS;
use crate::{BinaryWord, Statistics};
use serde::{Deserialize, Serialize};

// =============================================================================
// PROVENANCE
// =============================================================================

/// Why the fallback sequence replaced document data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The document could not be retrieved.
    Unreachable { error: String },
    /// The document was retrieved but contained no recognized labels.
    NoLabels,
}

/// Where the analyzed labels came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Provenance {
    Document,
    Fallback { reason: FallbackReason },
}

impl Provenance {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// One-line description for the text report.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Document => String::from("document"),
            Self::Fallback {
                reason: FallbackReason::NoLabels,
            } => String::from("sample data (no labels recognized)"),
            Self::Fallback {
                reason: FallbackReason::Unreachable { error },
            } => format!("sample data (fetch failed: {error})"),
        }
    }
}

// =============================================================================
// PERSISTENCE OUTCOME
// =============================================================================

/// Result of the optional persistence step. Never fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistenceOutcome {
    /// Persistence was not requested.
    #[default]
    Disabled,
    /// Nothing to save.
    Empty,
    /// Every label was upserted.
    Saved { rows: usize },
    /// Connection or query failure.
    Failed { error: String },
}

impl PersistenceOutcome {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Disabled => String::from("not requested"),
            Self::Empty => String::from("skipped, no color data to save"),
            Self::Saved { rows } => format!("saved {rows} rows"),
            Self::Failed { error } => format!("failed: {error}"),
        }
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

/// Statistics over the acquired labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// The document locator as configured.
    pub source: String,
    pub provenance: Provenance,
    pub statistics: Statistics,
    pub persistence: PersistenceOutcome,
}

/// Answers to the bonus questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusResults {
    pub haystack: Vec<i64>,
    pub needle: i64,
    /// `None` when the needle is absent.
    pub search_index: Option<usize>,
    pub binary: BinaryWord,
    pub fibonacci_terms: usize,
    /// `None` when the sum overflows a `u64`.
    pub fibonacci_sum: Option<u64>,
}

// =============================================================================
// REPORT
// =============================================================================

/// The complete run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<BonusResults>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_analysis(&mut self, analysis: Analysis) {
        self.analysis = Some(analysis);
    }

    pub fn set_bonus(&mut self, bonus: BonusResults) {
        self.bonus = Some(bonus);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.analysis.is_none() && self.bonus.is_none()
    }

    /// Format as plain text in the fixed report order.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");

        if let Some(analysis) = &self.analysis {
            push_analysis(&mut output, analysis);
        }

        if self.analysis.is_some() && self.bonus.is_some() {
            output.push_str("├─────────────────────────────────────┤\n");
        }

        if let Some(bonus) = &self.bonus {
            push_bonus(&mut output, bonus);
        }

        if self.is_empty() {
            output.push_str("│ - (none)                           │\n");
        }

        output.push_str("└─────────────────────────────────────┘\n");

        output
    }
}

fn or_none(label: Option<&crate::Label>) -> &str {
    label.map(crate::Label::as_str).unwrap_or("(none)")
}

fn push_analysis(output: &mut String, analysis: &Analysis) {
    let stats = &analysis.statistics;

    output.push_str("│ COLOR STATISTICS                    │\n");
    output.push_str(&format!("│ - Source: {}\n", analysis.source));
    output.push_str(&format!("│ - Data: {}\n", analysis.provenance.describe()));
    output.push_str(&format!("│ - Entries: {}\n", stats.total));
    output.push_str("│ - Frequencies:\n");
    if stats.frequencies.is_empty() {
        output.push_str("│     (none)\n");
    } else {
        for (label, count) in stats.frequencies.most_common() {
            output.push_str(&format!("│     {:<8} {}\n", label.as_str(), count));
        }
    }
    output.push_str(&format!("│ - Mean color: {}\n", or_none(stats.mode.as_ref())));
    output.push_str(&format!(
        "│ - Most frequent: {}\n",
        or_none(stats.most_frequent.as_ref())
    ));
    output.push_str(&format!("│ - Median color: {}\n", or_none(stats.median.as_ref())));
    output.push_str(&format!(
        "│ - Variance: {}\n",
        stats.variance.to_fixed(REPORT_DECIMALS)
    ));
    output.push_str(&format!(
        "│ - P({}): {}%\n",
        stats.target,
        stats.target_probability.percent_fixed(REPORT_DECIMALS)
    ));
    output.push_str(&format!(
        "│ - Persistence: {}\n",
        analysis.persistence.describe()
    ));
}

fn push_bonus(output: &mut String, bonus: &BonusResults) {
    let haystack = bonus
        .haystack
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let index = bonus
        .search_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| String::from("-1"));
    let fibonacci = bonus
        .fibonacci_sum
        .map(|s| s.to_string())
        .unwrap_or_else(|| String::from("(overflow)"));

    output.push_str("│ BONUS                               │\n");
    output.push_str(&format!(
        "│ - Search {} in [{}]: index {}\n",
        bonus.needle, haystack, index
    ));
    output.push_str(&format!(
        "│ - Binary {} -> decimal {}\n",
        bonus.binary,
        bonus.binary.value()
    ));
    output.push_str(&format!(
        "│ - Sum of first {} Fibonacci numbers: {}\n",
        bonus.fibonacci_terms, fibonacci
    ));
}

// =============================================================================
// TESTS
// =============================================================================
