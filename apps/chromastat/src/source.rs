//! # Label Source
//!
//! Acquires the document and turns it into labels.
//!
//! The source always produces data. If the document cannot be read, or is
//! read but holds no recognized labels, the fixed fallback sequence is used
//! instead. Which of the three happened is recorded in the [`Provenance`]
//! so callers can tell sample data from real data.

use crate::AppError;
use chromastat_core::{FallbackReason, LabelSequence, Provenance, Recognizer, fallback_sequence};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// DOCUMENT LOCATOR
// =============================================================================

/// Where the document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLocator {
    /// Fetched with a single HTTP GET.
    Http(String),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl DocumentLocator {
    /// `http://` and `https://` are URLs; `file://` and anything else is a path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(raw.to_string())
        } else if lower.starts_with("file://") {
            Self::File(PathBuf::from(&raw["file://".len()..]))
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for DocumentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// =============================================================================
// ACQUISITION
// =============================================================================

/// Labels produced by the source, with their origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquisition {
    pub labels: LabelSequence,
    pub provenance: Provenance,
}

impl Acquisition {
    fn fallback(reason: FallbackReason) -> Self {
        Self {
            labels: fallback_sequence(),
            provenance: Provenance::Fallback { reason },
        }
    }
}

/// Apply the fallback policy to the outcome of a fetch.
pub fn resolve(fetched: Result<String, AppError>, recognizer: &Recognizer) -> Acquisition {
    match fetched {
        Err(error) => {
            tracing::warn!(%error, "Document unavailable, using sample data");
            Acquisition::fallback(FallbackReason::Unreachable {
                error: error.to_string(),
            })
        }
        Ok(document) => {
            let labels = recognizer.extract(&document);
            if labels.is_empty() {
                tracing::warn!(
                    bytes = document.len(),
                    "No labels recognized in document, using sample data"
                );
                Acquisition::fallback(FallbackReason::NoLabels)
            } else {
                tracing::debug!(count = labels.len(), "Extracted labels from document");
                Acquisition {
                    labels,
                    provenance: Provenance::Document,
                }
            }
        }
    }
}

// =============================================================================
// LABEL SOURCE
// =============================================================================

/// One document plus the recognizer that reads it.
#[derive(Debug, Clone)]
pub struct LabelSource {
    locator: DocumentLocator,
    recognizer: Recognizer,
    client: reqwest::Client,
}

impl LabelSource {
    /// Create a source; `timeout` bounds the whole HTTP request.
    pub fn new(
        locator: DocumentLocator,
        recognizer: Recognizer,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            locator,
            recognizer,
            client,
        })
    }

    #[must_use]
    pub fn locator(&self) -> &DocumentLocator {
        &self.locator
    }

    /// Read the raw document. No retries.
    pub async fn fetch(&self) -> Result<String, AppError> {
        match &self.locator {
            DocumentLocator::Http(url) => {
                tracing::info!(%url, "Fetching document");
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AppError::HttpStatus {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                Ok(response.text().await?)
            }
            DocumentLocator::File(path) => {
                tracing::info!(path = %path.display(), "Reading document");
                Ok(tokio::fs::read_to_string(path).await?)
            }
        }
    }

    /// Fetch and extract, falling back to sample data on any failure.
    pub async fn acquire(&self) -> Acquisition {
        resolve(self.fetch().await, &self.recognizer)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chromastat_core::Label;

    #[test]
    fn locator_parsing() {
        assert_eq!(
            DocumentLocator::parse("https://example.com/colors.html"),
            DocumentLocator::Http(String::from("https://example.com/colors.html"))
        );
        assert_eq!(
            DocumentLocator::parse("HTTP://example.com"),
            DocumentLocator::Http(String::from("HTTP://example.com"))
        );
        assert_eq!(
            DocumentLocator::parse("file:///tmp/colors.html"),
            DocumentLocator::File(PathBuf::from("/tmp/colors.html"))
        );
        assert_eq!(
            DocumentLocator::parse("data/colors.html"),
            DocumentLocator::File(PathBuf::from("data/colors.html"))
        );
    }

    #[test]
    fn resolve_uses_document_labels() {
        let recognizer = Recognizer::colors().unwrap();
        let acquisition = resolve(Ok(String::from("<td>BLUE</td><td>PINK</td>")), &recognizer);
        assert_eq!(acquisition.provenance, Provenance::Document);
        assert_eq!(
            acquisition.labels,
            LabelSequence::new(vec![Label::new("BLUE").unwrap(), Label::new("PINK").unwrap()])
        );
    }

    #[test]
    fn resolve_falls_back_on_error() {
        let recognizer = Recognizer::colors().unwrap();
        let error = AppError::Config(String::from("boom"));
        let acquisition = resolve(Err(error), &recognizer);
        assert_eq!(acquisition.labels, fallback_sequence());
        assert!(matches!(
            acquisition.provenance,
            Provenance::Fallback {
                reason: FallbackReason::Unreachable { .. }
            }
        ));
    }

    #[test]
    fn resolve_falls_back_on_no_labels() {
        let recognizer = Recognizer::colors().unwrap();
        let acquisition = resolve(Ok(String::from("<p>nothing here</p>")), &recognizer);
        assert_eq!(acquisition.labels, fallback_sequence());
        assert_eq!(
            acquisition.provenance,
            Provenance::Fallback {
                reason: FallbackReason::NoLabels
            }
        );
    }
}
