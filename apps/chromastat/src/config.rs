//! # Configuration
//!
//! Typed settings for each command. Defaults reproduce the fixed constants
//! of the standard run; the CLI overrides them field by field.

use crate::AppError;
use chromastat_core::primitives::{
    DEFAULT_BINARY_WIDTH, DEFAULT_FIBONACCI_TERMS, DEFAULT_SEARCH_HAYSTACK, DEFAULT_SEARCH_NEEDLE,
};
use chromastat_core::{Label, default_target, default_vocabulary};
use std::fmt;
use std::time::Duration;

/// Page holding the color table.
pub const DEFAULT_SOURCE: &str =
    "https://drive.google.com/open?id=1nf9WMDjZWlUnlnKyz7qomEYDdtWW11Jf";

/// Request timeout for the document fetch.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_NAME: &str = "bincom_colors";
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "password";

// =============================================================================
// DATABASE
// =============================================================================

/// PostgreSQL connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            database: DEFAULT_DB_NAME.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Settings for acquiring labels and computing statistics.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// URL or filesystem path of the document.
    pub source: String,
    /// Closed set of labels the recognizer accepts.
    pub vocabulary: Vec<Label>,
    /// Label whose probability is reported.
    pub target: Label,
    pub timeout: Duration,
    /// Upsert the frequency table into PostgreSQL.
    pub persist: bool,
    pub database: DatabaseConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            vocabulary: default_vocabulary(),
            target: default_target(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            persist: false,
            database: DatabaseConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Default settings reading from `source`.
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// BONUS
// =============================================================================

/// Settings for the bonus questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusConfig {
    pub haystack: Vec<i64>,
    pub needle: i64,
    pub fibonacci_terms: usize,
    pub binary_width: usize,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            haystack: DEFAULT_SEARCH_HAYSTACK.to_vec(),
            needle: DEFAULT_SEARCH_NEEDLE,
            fibonacci_terms: DEFAULT_FIBONACCI_TERMS,
            binary_width: DEFAULT_BINARY_WIDTH,
        }
    }
}

// =============================================================================
// PARSERS
// =============================================================================

/// Parse a comma-separated label list such as `red,green,blue`.
pub fn parse_vocabulary(raw: &str) -> Result<Vec<Label>, AppError> {
    let labels = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Label::new)
        .collect::<Result<Vec<_>, _>>()?;
    if labels.is_empty() {
        return Err(AppError::Config(format!("no labels in vocabulary {raw:?}")));
    }
    Ok(labels)
}

/// Parse a comma-separated integer list such as `1,5,8`.
///
/// An empty string is an empty list.
pub fn parse_haystack(raw: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|e| AppError::Config(format!("invalid number {s:?}: {e}")))
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn analysis_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.vocabulary.len(), 11);
        assert_eq!(config.target.as_str(), "RED");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.persist);
    }

    #[test]
    fn bonus_defaults() {
        let config = BonusConfig::default();
        assert_eq!(config.haystack, vec![1, 5, 8, 12, 15, 20, 25]);
        assert_eq!(config.needle, 15);
        assert_eq!(config.fibonacci_terms, 50);
        assert_eq!(config.binary_width, 4);
    }

    #[test]
    fn database_debug_hides_password() {
        let config = DatabaseConfig {
            password: String::from("hunter2"),
            ..DatabaseConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("bincom_colors"));
    }

    #[test]
    fn vocabulary_parsing() {
        let labels = parse_vocabulary(" red, Teal ,,blue").unwrap();
        let names: Vec<_> = labels.iter().map(Label::as_str).collect();
        assert_eq!(names, vec!["RED", "TEAL", "BLUE"]);

        assert!(parse_vocabulary(" , ").is_err());
        assert!(parse_vocabulary("light blue").is_err());
    }

    #[test]
    fn haystack_parsing() {
        assert_eq!(parse_haystack("1, 5,8").unwrap(), vec![1, 5, 8]);
        assert_eq!(parse_haystack("").unwrap(), Vec::<i64>::new());
        assert!(parse_haystack("1,x").is_err());
    }
}
