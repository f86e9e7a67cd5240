//! # Frequency Table
//!
//! Per-label counts derived from a [`LabelSequence`].

use crate::{Label, LabelSequence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label -> count, iterated in lexicographic label order.
///
/// Built from a sequence, so the counts always sum to the sequence length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: BTreeMap<Label, usize>,
}

impl FrequencyTable {
    /// Count every label in the sequence.
    #[must_use]
    pub fn from_sequence(labels: &LabelSequence) -> Self {
        let mut counts = BTreeMap::new();
        for label in labels {
            let count: &mut usize = counts.entry(label.clone()).or_default();
            *count = count.saturating_add(1);
        }
        Self { counts }
    }

    /// Count of a label, zero if it never appears.
    #[must_use]
    pub fn count(&self, label: &Label) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Check whether no labels were counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(label, count)` pairs in lexicographic label order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, usize)> {
        self.counts.iter().map(|(label, count)| (label, *count))
    }

    /// Counts in lexicographic label order.
    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts.values().copied()
    }

    /// Labels by descending count; ties keep lexicographic order.
    #[must_use]
    pub fn most_common(&self) -> Vec<(&Label, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        // Stable sort keeps the BTreeMap order among equal counts.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fallback_sequence;

    fn label(s: &str) -> Label {
        Label::new(s).unwrap()
    }

    #[test]
    fn counts_fallback_sequence() {
        let table = FrequencyTable::from_sequence(&fallback_sequence());
        assert_eq!(table.count(&label("RED")), 5);
        assert_eq!(table.count(&label("GREEN")), 4);
        assert_eq!(table.count(&label("BLUE")), 4);
        assert_eq!(table.count(&label("YELLOW")), 1);
        assert_eq!(table.distinct(), 4);
        assert_eq!(table.total(), 14);
    }

    #[test]
    fn missing_label_counts_zero() {
        let table = FrequencyTable::from_sequence(&fallback_sequence());
        assert_eq!(table.count(&label("ORANGE")), 0);
    }

    #[test]
    fn empty_sequence_gives_empty_table() {
        let table = FrequencyTable::from_sequence(&LabelSequence::default());
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn iteration_is_lexicographic() {
        let table = FrequencyTable::from_sequence(&fallback_sequence());
        let keys: Vec<_> = table.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(keys, vec!["BLUE", "GREEN", "RED", "YELLOW"]);
    }

    #[test]
    fn most_common_orders_by_count_then_label() {
        let table = FrequencyTable::from_sequence(&fallback_sequence());
        let ranked: Vec<_> = table
            .most_common()
            .into_iter()
            .map(|(l, c)| (l.as_str(), c))
            .collect();
        assert_eq!(
            ranked,
            vec![("RED", 5), ("BLUE", 4), ("GREEN", 4), ("YELLOW", 1)]
        );
    }

    #[test]
    fn serializes_as_object() {
        let seq = LabelSequence::parse(["red", "blue", "red"]).unwrap();
        let table = FrequencyTable::from_sequence(&seq);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"BLUE":1,"RED":2}"#);
    }
}
