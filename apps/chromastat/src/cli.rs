//! # CLI
//!
//! Command-line interface and command handlers.
//!
//! - `analyze`: acquire labels, compute statistics, optionally persist
//! - `bonus`: recursive search, random binary word, Fibonacci sum
//! - `report`: both, in one run (the default when no command is given)
//!
//! Handlers print the report on stdout; logs go to stderr.

use crate::AppError;
use crate::config::{
    AnalysisConfig, BonusConfig, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD,
    DEFAULT_DB_PORT, DEFAULT_DB_USER, DEFAULT_SOURCE, DEFAULT_TIMEOUT_SECS, DatabaseConfig,
    parse_haystack, parse_vocabulary,
};
use crate::source::{DocumentLocator, LabelSource};
use crate::store::persist_frequencies;
use chromastat_core::primitives::{
    DEFAULT_BINARY_WIDTH, DEFAULT_FIBONACCI_TERMS, DEFAULT_SEARCH_NEEDLE, DEFAULT_TARGET_LABEL,
};
use chromastat_core::{
    Analysis, BinaryWord, BonusResults, Label, PersistenceOutcome, Recognizer, Report,
    StatisticsEngine, fibonacci_sum, recursive_search,
};
use clap::{Args, Parser, Subcommand};
use rand::Rng;
use std::time::Duration;

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Color frequency statistics over an HTML table.
#[derive(Debug, Parser)]
#[command(name = "chromastat", version, about)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the report as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Acquire labels and compute statistics.
    Analyze(AnalyzeArgs),
    /// Answer the bonus questions.
    Bonus(BonusArgs),
    /// Analyze and answer the bonus questions.
    Report {
        #[command(flatten)]
        analyze: AnalyzeArgs,
        #[command(flatten)]
        bonus: BonusArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Document URL or file path.
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Label whose probability is reported.
    #[arg(long, default_value = DEFAULT_TARGET_LABEL)]
    pub target: String,

    /// Comma-separated labels to recognize (default: the standard colors).
    #[arg(long)]
    pub vocabulary: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Save the frequency table to PostgreSQL.
    #[arg(long)]
    pub persist: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    #[arg(long, default_value = DEFAULT_DB_HOST)]
    pub db_host: String,

    #[arg(long, default_value_t = DEFAULT_DB_PORT)]
    pub db_port: u16,

    #[arg(long, default_value = DEFAULT_DB_NAME)]
    pub db_name: String,

    #[arg(long, default_value = DEFAULT_DB_USER)]
    pub db_user: String,

    #[arg(long, default_value = DEFAULT_DB_PASSWORD)]
    pub db_password: String,
}

#[derive(Debug, Clone, Args)]
pub struct BonusArgs {
    /// Comma-separated integers to search (default: 1,5,8,12,15,20,25).
    #[arg(long)]
    pub haystack: Option<String>,

    /// Value to search for.
    #[arg(long, default_value_t = DEFAULT_SEARCH_NEEDLE, allow_negative_numbers = true)]
    pub needle: i64,

    /// Number of Fibonacci terms to sum.
    #[arg(long, default_value_t = DEFAULT_FIBONACCI_TERMS)]
    pub fib_terms: usize,

    /// Digits in the random binary word (1-64).
    #[arg(long, default_value_t = DEFAULT_BINARY_WIDTH)]
    pub binary_width: usize,
}

impl AnalyzeArgs {
    pub fn to_config(&self) -> Result<AnalysisConfig, AppError> {
        let mut config = AnalysisConfig::for_source(&self.source);
        config.target = Label::new(&self.target)?;
        if let Some(raw) = &self.vocabulary {
            config.vocabulary = parse_vocabulary(raw)?;
        }
        config.timeout = Duration::from_secs(self.timeout_secs);
        config.persist = self.persist;
        config.database = self.database.to_config();
        Ok(config)
    }
}

impl DatabaseArgs {
    pub fn to_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
        }
    }
}

impl BonusArgs {
    pub fn to_config(&self) -> Result<BonusConfig, AppError> {
        let mut config = BonusConfig {
            needle: self.needle,
            fibonacci_terms: self.fib_terms,
            binary_width: self.binary_width,
            ..BonusConfig::default()
        };
        if let Some(raw) = &self.haystack {
            config.haystack = parse_haystack(raw)?;
        }
        Ok(config)
    }
}

// =============================================================================
// RUNNERS
// =============================================================================

/// Acquire labels, compute statistics and optionally persist them.
///
/// Acquisition and persistence failures are recovered and recorded in the
/// result; only invalid configuration is an error.
pub async fn run_analysis(config: &AnalysisConfig) -> Result<Analysis, AppError> {
    let recognizer = Recognizer::new(config.vocabulary.iter().cloned())?;
    let source = LabelSource::new(
        DocumentLocator::parse(&config.source),
        recognizer,
        config.timeout,
    )?;

    let acquisition = source.acquire().await;
    let engine = StatisticsEngine::new(&acquisition.labels);
    let statistics = engine.summarize(&config.target);
    tracing::info!(
        entries = statistics.total,
        distinct = statistics.distinct,
        fallback = acquisition.provenance.is_fallback(),
        "Computed color statistics"
    );

    let persistence = if config.persist {
        persist_frequencies(&config.database, engine.frequencies()).await
    } else {
        PersistenceOutcome::Disabled
    };

    Ok(Analysis {
        source: source.locator().to_string(),
        provenance: acquisition.provenance,
        statistics,
        persistence,
    })
}

/// Answer the bonus questions, drawing the binary word from `rng`.
pub fn run_bonus<R: Rng>(config: &BonusConfig, rng: &mut R) -> Result<BonusResults, AppError> {
    let binary = BinaryWord::from_bits(rng.random::<u64>(), config.binary_width)?;
    let fibonacci = fibonacci_sum(config.fibonacci_terms);
    if fibonacci.is_none() {
        tracing::warn!(terms = config.fibonacci_terms, "Fibonacci sum overflows u64");
    }
    Ok(BonusResults {
        haystack: config.haystack.clone(),
        needle: config.needle,
        search_index: recursive_search(&config.haystack, &config.needle),
        binary,
        fibonacci_terms: config.fibonacci_terms,
        fibonacci_sum: fibonacci,
    })
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Render the report on stdout.
pub fn emit(report: &Report, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

pub async fn cmd_analyze(config: &AnalysisConfig, json: bool) -> Result<Report, AppError> {
    let mut report = Report::new();
    report.set_analysis(run_analysis(config).await?);
    emit(&report, json)?;
    Ok(report)
}

pub fn cmd_bonus(config: &BonusConfig, json: bool) -> Result<Report, AppError> {
    let mut report = Report::new();
    report.set_bonus(run_bonus(config, &mut rand::rng())?);
    emit(&report, json)?;
    Ok(report)
}

pub async fn cmd_report(
    analysis: &AnalysisConfig,
    bonus: &BonusConfig,
    json: bool,
) -> Result<Report, AppError> {
    // Validate both before touching the network.
    let bonus_results = run_bonus(bonus, &mut rand::rng())?;
    let mut report = Report::new();
    report.set_analysis(run_analysis(analysis).await?);
    report.set_bonus(bonus_results);
    emit(&report, json)?;
    Ok(report)
}

/// Run the parsed command line.
pub async fn dispatch(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Some(Command::Analyze(args)) => {
            cmd_analyze(&args.to_config()?, cli.json).await?;
        }
        Some(Command::Bonus(args)) => {
            cmd_bonus(&args.to_config()?, cli.json)?;
        }
        Some(Command::Report { analyze, bonus }) => {
            cmd_report(&analyze.to_config()?, &bonus.to_config()?, cli.json).await?;
        }
        None => {
            cmd_report(&AnalysisConfig::default(), &BonusConfig::default(), cli.json).await?;
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_to_default_config() {
        let cli = Cli::try_parse_from(["chromastat", "analyze"]).unwrap();
        let Some(Command::Analyze(args)) = cli.command else {
            unreachable!("parsed analyze");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.target.as_str(), "RED");
        assert_eq!(config.database, DatabaseConfig::default());
        assert!(!config.persist);
    }

    #[test]
    fn analyze_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "chromastat",
            "--json",
            "analyze",
            "--source",
            "colors.html",
            "--target",
            "blue",
            "--vocabulary",
            "red,blue",
            "--persist",
            "--db-port",
            "6000",
        ])
        .unwrap();
        assert!(cli.json);
        let Some(Command::Analyze(args)) = cli.command else {
            unreachable!("parsed analyze");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.source, "colors.html");
        assert_eq!(config.target.as_str(), "BLUE");
        assert_eq!(config.vocabulary.len(), 2);
        assert!(config.persist);
        assert_eq!(config.database.port, 6000);
    }

    #[test]
    fn report_accepts_both_flag_sets() {
        let cli = Cli::try_parse_from([
            "chromastat",
            "report",
            "--source",
            "colors.html",
            "--needle",
            "-3",
            "--haystack",
            "4,-3",
        ])
        .unwrap();
        let Some(Command::Report { analyze, bonus }) = cli.command else {
            unreachable!("parsed report");
        };
        assert_eq!(analyze.to_config().unwrap().source, "colors.html");
        let bonus = bonus.to_config().unwrap();
        assert_eq!(bonus.needle, -3);
        assert_eq!(bonus.haystack, vec![4, -3]);
    }

    #[test]
    fn invalid_target_is_config_error() {
        let cli = Cli::try_parse_from(["chromastat", "analyze", "--target", "a b"]).unwrap();
        let Some(Command::Analyze(args)) = cli.command else {
            unreachable!("parsed analyze");
        };
        assert!(args.to_config().is_err());
    }
}
