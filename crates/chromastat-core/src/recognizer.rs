//! # Recognizer
//!
//! Extracts labels from HTML documents.
//!
//! Labels live in table cells (`<td ...>...</td>`). A cell may hold a single
//! label or a comma-separated list of them. Every token in a cell is
//! uppercased and kept if it belongs to the recognizer's closed vocabulary;
//! everything else in the document is ignored.
//!
//! A scanner, not an HTML parser: cell boundaries are
//! found with a case-insensitive pattern and nested tags inside a cell are
//! blanked out before tokenizing.

use crate::{CoreError, Label, LabelSequence, default_vocabulary};
use regex::Regex;
use std::collections::BTreeSet;

/// Table cell contents, case-insensitive, spanning newlines.
const CELL_PATTERN: &str = r"(?is)<td\b[^>]*>(.*?)</td\s*>";

/// Any tag nested inside a cell.
const TAG_PATTERN: &str = r"<[^>]*>";

/// Turns document text into a [`LabelSequence`].
#[derive(Debug, Clone)]
pub struct Recognizer {
    vocabulary: BTreeSet<Label>,
    cell: Regex,
    tag: Regex,
}

impl Recognizer {
    /// Create a recognizer for the given closed set of labels.
    pub fn new(vocabulary: impl IntoIterator<Item = Label>) -> Result<Self, CoreError> {
        let vocabulary: BTreeSet<Label> = vocabulary.into_iter().collect();
        if vocabulary.is_empty() {
            return Err(CoreError::EmptyVocabulary);
        }
        Ok(Self {
            vocabulary,
            cell: compile(CELL_PATTERN)?,
            tag: compile(TAG_PATTERN)?,
        })
    }

    /// Recognizer for the eleven standard color names.
    pub fn colors() -> Result<Self, CoreError> {
        Self::new(default_vocabulary())
    }

    /// The labels this recognizer accepts, in lexicographic order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &Label> {
        self.vocabulary.iter()
    }

    /// Check whether a label is in the vocabulary.
    #[must_use]
    pub fn recognizes(&self, label: &Label) -> bool {
        self.vocabulary.contains(label)
    }

    /// Extract recognized labels in document order.
    ///
    /// Returns an empty sequence when the document has no cells or none of
    /// the cell tokens are in the vocabulary.
    #[must_use]
    pub fn extract(&self, document: &str) -> LabelSequence {
        self.cell
            .captures_iter(document)
            .filter_map(|caps| caps.get(1))
            .flat_map(|content| self.cell_labels(content.as_str()))
            .collect()
    }

    fn cell_labels(&self, content: &str) -> Vec<Label> {
        let text = self.tag.replace_all(content, " ");
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .filter_map(|token| Label::new(token).ok())
            .filter(|label| self.recognizes(label))
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(pattern).map_err(|e| CoreError::Pattern(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
