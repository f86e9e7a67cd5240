//! # Statistics Engine
//!
//! Descriptive statistics over one immutable [`LabelSequence`].
//!
//! The engine borrows the sequence and derives its [`FrequencyTable`] once,
//! so every query answered by the same engine observes the same snapshot.
//! No query fails: on an empty sequence mode and median are absent, while
//! variance and probability are zero.

use crate::{FrequencyTable, Label, LabelSequence, Ratio};
use serde::{Deserialize, Serialize};

/// Read-only view that answers the four categorical queries.
#[derive(Debug, Clone)]
pub struct StatisticsEngine<'a> {
    labels: &'a LabelSequence,
    table: FrequencyTable,
}

impl<'a> StatisticsEngine<'a> {
    /// Snapshot a sequence and derive its frequency table.
    #[must_use]
    pub fn new(labels: &'a LabelSequence) -> Self {
        Self {
            labels,
            table: FrequencyTable::from_sequence(labels),
        }
    }

    /// The sequence this engine was built from.
    #[must_use]
    pub fn labels(&self) -> &'a LabelSequence {
        self.labels
    }

    #[must_use]
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.table
    }

    /// The label with the highest count.
    ///
    /// Ties go to the lexicographically first label. The table iterates in
    /// label order, and only a strictly greater count replaces the current
    /// best.
    #[must_use]
    pub fn mode(&self) -> Option<&Label> {
        let mut best: Option<(&Label, usize)> = None;
        for (label, count) in self.table.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((label, count)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Same as [`Self::mode`]; for categorical data the two coincide.
    #[must_use]
    pub fn most_frequent(&self) -> Option<&Label> {
        self.mode()
    }

    /// The lower middle element of the lexicographically sorted sequence.
    ///
    /// Index `n / 2` for odd `n`, `(n - 1) / 2` for even `n`. Labels cannot
    /// be averaged, so the result is always a member of the sequence.
    #[must_use]
    pub fn median(&self) -> Option<&'a Label> {
        let n = self.labels.len();
        if n == 0 {
            return None;
        }
        let index = if n % 2 == 1 { n / 2 } else { (n - 1) / 2 };
        self.labels.sorted().get(index).copied()
    }

    /// Population variance of the per-label counts.
    ///
    /// This is a self-defined dispersion heuristic, not a textbook variance
    /// of the labels. With `k` distinct labels and `n` labels in total, the
    /// mean count is `n / k` and
    ///
    /// ```text
    /// variance = (1/k) * Σ (count - n/k)²  =  (k * Σ count² - n²) / k²
    /// ```
    ///
    /// The right-hand form keeps the arithmetic in integers.
    #[must_use]
    pub fn variance(&self) -> Ratio {
        let k = self.table.distinct() as u128;
        if k == 0 {
            return Ratio::ZERO;
        }
        let n = self.table.total() as u128;
        let sum_of_squares = self
            .table
            .counts()
            .map(|c| (c as u128).saturating_mul(c as u128))
            .fold(0u128, u128::saturating_add);
        // k * Σc² >= n² by Cauchy-Schwarz.
        let numerator = k
            .saturating_mul(sum_of_squares)
            .saturating_sub(n.saturating_mul(n));
        Ratio::new(numerator, k.saturating_mul(k))
    }

    /// Empirical probability of drawing `label`: `count(label) / n`.
    #[must_use]
    pub fn probability(&self, label: &Label) -> Ratio {
        Ratio::from_counts(self.table.count(label), self.labels.len())
    }

    /// Answer every query at once for the report.
    #[must_use]
    pub fn summarize(&self, target: &Label) -> Statistics {
        Statistics {
            total: self.labels.len(),
            distinct: self.table.distinct(),
            frequencies: self.table.clone(),
            mode: self.mode().cloned(),
            most_frequent: self.most_frequent().cloned(),
            median: self.median().cloned(),
            variance: self.variance(),
            target: target.clone(),
            target_probability: self.probability(target),
        }
    }
}

/// All statistics computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of labels, duplicates included.
    pub total: usize,
    /// Number of distinct labels.
    pub distinct: usize,
    pub frequencies: FrequencyTable,
    pub mode: Option<Label>,
    pub most_frequent: Option<Label>,
    pub median: Option<Label>,
    pub variance: Ratio,
    /// Label whose probability was requested.
    pub target: Label,
    pub target_probability: Ratio,
}

// =============================================================================
// TESTS
// =============================================================================
