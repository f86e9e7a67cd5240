//! # Aggregate Persistence
//!
//! Upserts the frequency table into PostgreSQL.
//!
//! One table, keyed by label, overwritten on conflict:
//!
//! ```sql
//! color_frequencies(color TEXT PRIMARY KEY, frequency INTEGER NOT NULL)
//! ```
//!
//! All rows of one run are written in a single transaction.

use crate::AppError;
use crate::config::DatabaseConfig;
use chromastat_core::{FrequencyTable, PersistenceOutcome};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS color_frequencies (\
     color TEXT PRIMARY KEY, \
     frequency INTEGER NOT NULL)";

pub const UPSERT_SQL: &str = "INSERT INTO color_frequencies (color, frequency) \
     VALUES ($1, $2) \
     ON CONFLICT (color) DO UPDATE SET frequency = EXCLUDED.frequency";

pub const SELECT_ALL_SQL: &str =
    "SELECT color, frequency FROM color_frequencies ORDER BY color";

/// How long to wait for a connection before giving up.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

impl DatabaseConfig {
    /// Connection options for this configuration.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

/// Handle to the `color_frequencies` table.
#[derive(Debug, Clone)]
pub struct FrequencyStore {
    pool: PgPool,
}

impl FrequencyStore {
    /// Connect using the configured host and credentials.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = Self::pool_options()
            .connect_with(config.connect_options())
            .await?;
        Ok(Self { pool })
    }

    /// Connect with a `postgres://` URL.
    pub async fn connect_url(url: &str) -> Result<Self, AppError> {
        let pool = Self::pool_options().connect(url).await?;
        Ok(Self { pool })
    }

    // The run is sequential; one connection is all it ever uses.
    fn pool_options() -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(CONNECT_TIMEOUT)
    }

    /// Create the table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Upsert every `(label, count)` pair. Returns the number of rows written.
    pub async fn save(&self, table: &FrequencyTable) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut rows = 0usize;
        for (label, count) in table.iter() {
            let frequency = i32::try_from(count).map_err(|_| {
                AppError::Config(format!("count {count} for {label} exceeds INTEGER"))
            })?;
            sqlx::query(UPSERT_SQL)
                .bind(label.as_str())
                .bind(frequency)
                .execute(&mut *tx)
                .await?;
            rows = rows.saturating_add(1);
        }
        tx.commit().await?;
        Ok(rows)
    }

    /// All stored rows, ordered by color.
    pub async fn load_all(&self) -> Result<Vec<(String, i32)>, AppError> {
        let rows = sqlx::query_as::<_, (String, i32)>(SELECT_ALL_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

/// Persist a frequency table, reporting instead of failing.
///
/// An empty table is skipped without connecting.
pub async fn persist_frequencies(
    config: &DatabaseConfig,
    table: &FrequencyTable,
) -> PersistenceOutcome {
    if table.is_empty() {
        tracing::warn!("No color data to save");
        return PersistenceOutcome::Empty;
    }

    let result = async {
        let store = FrequencyStore::connect(config).await?;
        store.ensure_schema().await?;
        let rows = store.save(table).await?;
        store.close().await;
        Ok::<_, AppError>(rows)
    }
    .await;

    match result {
        Ok(rows) => {
            tracing::info!(rows, database = %config.database, "Saved color frequencies");
            PersistenceOutcome::Saved { rows }
        }
        Err(error) => {
            tracing::error!(%error, host = %config.host, "Failed to save color frequencies");
            PersistenceOutcome::Failed {
                error: error.to_string(),
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_follow_config() {
        let config = DatabaseConfig {
            host: String::from("db.internal"),
            port: 6543,
            ..DatabaseConfig::default()
        };
        let options = config.connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("bincom_colors"));
        assert_eq!(options.get_username(), "postgres");
    }

    #[test]
    fn upsert_overwrites_on_conflict() {
        assert!(UPSERT_SQL.contains("ON CONFLICT (color) DO UPDATE"));
        assert!(UPSERT_SQL.contains("EXCLUDED.frequency"));
        assert!(CREATE_TABLE_SQL.contains("color TEXT PRIMARY KEY"));
        assert!(CREATE_TABLE_SQL.contains("frequency INTEGER NOT NULL"));
    }

    #[tokio::test]
    async fn empty_table_is_skipped() {
        let outcome =
            persist_frequencies(&DatabaseConfig::default(), &FrequencyTable::default()).await;
        assert_eq!(outcome, PersistenceOutcome::Empty);
    }
}
