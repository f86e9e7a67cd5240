//! # Labels
//!
//! A [`Label`] is an opaque categorical token, normalized to uppercase.
//! A [`LabelSequence`] keeps labels in the order they were encountered and
//! offers no way to change them afterwards.

use crate::CoreError;
use crate::primitives::{DEFAULT_TARGET_LABEL, DEFAULT_VOCABULARY, FALLBACK_LABELS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// LABEL
// =============================================================================

/// A categorical value such as a color name.
///
/// Ordering is plain lexicographic ordering of the uppercase text. It has no
/// meaning beyond giving median and tie-break a reproducible order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

impl Label {
    /// Create a label, normalizing it to uppercase.
    ///
    /// Surrounding whitespace is trimmed. The result must be non-empty and
    /// must not contain whitespace or commas, since those separate labels in
    /// documents.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CoreError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || trimmed.chars().any(|c| c.is_whitespace() || c == ',') {
            return Err(CoreError::InvalidLabel(raw.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Build a label from a constant already known to be valid uppercase.
    pub(crate) fn trusted(value: &str) -> Self {
        Self(value.to_string())
    }

    /// The uppercase text of this label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Label {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Label {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// LABEL SEQUENCE
// =============================================================================

/// Labels in document order.
///
/// Created once per analysis run and read-only afterwards: every statistic
/// computed from the same sequence observes the same data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSequence {
    labels: Vec<Label>,
}

impl LabelSequence {
    /// Create a sequence from labels, keeping their order.
    #[must_use]
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Parse every raw token into a label.
    ///
    /// Fails on the first invalid token.
    pub fn parse<I, S>(raw: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(Label::new)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Number of labels, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check whether the sequence holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Labels as a slice, in their original order.
    #[must_use]
    pub fn as_slice(&self) -> &[Label] {
        &self.labels
    }

    /// A lexicographically sorted copy of the labels.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Label> {
        let mut sorted: Vec<&Label> = self.labels.iter().collect();
        sorted.sort();
        sorted
    }
}

impl FromIterator<Label> for LabelSequence {
    fn from_iter<T: IntoIterator<Item = Label>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LabelSequence {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

/// The fixed sample sequence used when no labels could be acquired.
#[must_use]
pub fn fallback_sequence() -> LabelSequence {
    FALLBACK_LABELS.iter().map(|s| Label::trusted(s)).collect()
}

/// The eleven standard color names.
#[must_use]
pub fn default_vocabulary() -> Vec<Label> {
    DEFAULT_VOCABULARY.iter().map(|s| Label::trusted(s)).collect()
}

/// The label whose probability is reported unless another is configured.
#[must_use]
pub fn default_target() -> Label {
    Label::trusted(DEFAULT_TARGET_LABEL)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn label_is_uppercased_and_trimmed() {
        let label = Label::new("  green ").unwrap();
        assert_eq!(label.as_str(), "GREEN");
    }

    #[test]
    fn label_rejects_empty_and_separators() {
        assert!(Label::new("").is_err());
        assert!(Label::new("   ").is_err());
        assert!(Label::new("LIGHT BLUE").is_err());
        assert!(Label::new("RED,BLUE").is_err());
    }

    #[test]
    fn label_serializes_as_plain_string() {
        let label = Label::new("pink").unwrap();
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"PINK\"");

        let back: Label = serde_json::from_str("\"purple\"").unwrap();
        assert_eq!(back.as_str(), "PURPLE");

        assert!(serde_json::from_str::<Label>("\"\"").is_err());
    }

    #[test]
    fn sequence_preserves_order() {
        let seq = LabelSequence::parse(["blue", "red", "blue"]).unwrap();
        let order: Vec<_> = seq.iter().map(Label::as_str).collect();
        assert_eq!(order, vec!["BLUE", "RED", "BLUE"]);
    }

    #[test]
    fn sorted_does_not_reorder_original() {
        let seq = LabelSequence::parse(["yellow", "blue", "red"]).unwrap();
        let sorted: Vec<_> = seq.sorted().into_iter().map(Label::as_str).collect();
        assert_eq!(sorted, vec!["BLUE", "RED", "YELLOW"]);
        assert_eq!(seq.as_slice()[0].as_str(), "YELLOW");
    }

    #[test]
    fn fallback_is_fourteen_fixed_labels() {
        let first = fallback_sequence();
        let second = fallback_sequence();
        assert_eq!(first.len(), 14);
        assert_eq!(first, second);
        assert_eq!(first.as_slice()[7].as_str(), "YELLOW");
    }

    #[test]
    fn trusted_constants_are_valid_labels() {
        for label in default_vocabulary()
            .into_iter()
            .chain(fallback_sequence().iter().cloned())
            .chain(std::iter::once(default_target()))
        {
            assert_eq!(Label::new(label.as_str()).unwrap(), label);
        }
    }
}
