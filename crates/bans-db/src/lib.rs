//! # bans-db
//!
//! Storage layer implementing the punishment and account-history ports with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and embedded migrations
//! - A query executor that retries transient failures with backoff
//! - Database models with SQLx `FromRow` derives
//! - Model ↔ entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bans_common::{AppConfig, AppResult};
//! use bans_core::{PunishmentSelector, PunishmentType, SelectionOrder};
//! use bans_db::PunishmentStore;
//!
//! async fn example() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let store = PunishmentStore::connect(&config).await?;
//!
//!     let order = SelectionOrder::builder()
//!         .punishment_type(PunishmentType::Ban)
//!         .build()?;
//!     let active = store.selector.all_specific_punishments(&order).await?;
//!     Ok(())
//! }
//! ```

use bans_common::{AppConfig, AppError, AppResult};

pub mod execute;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use execute::{QueryExecutor, RetryPolicy};
pub use pool::{
    create_lazy_pool, create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool,
};
pub use repositories::{
    PgAccountHistory, PgPunishmentDrafter, PgPunishmentRevoker, PgPunishmentSelector,
};

/// Every repository wired to one executor
#[derive(Clone)]
pub struct PunishmentStore {
    pub selector: PgPunishmentSelector,
    pub drafter: PgPunishmentDrafter,
    pub revoker: PgPunishmentRevoker,
    pub accounts: PgAccountHistory,
}

impl PunishmentStore {
    /// Build the repositories over a pool with the default retry policy
    pub fn new(pool: PgPool) -> Self {
        Self::with_executor(QueryExecutor::new(pool))
    }

    /// Connect, apply migrations, and wire the repositories with the
    /// configured retry budget
    ///
    /// # Errors
    /// Pool creation and migration failures surface as `AppError::Internal`.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let pool = create_pool(&DatabaseConfig::from(&config.database))
            .await
            .map_err(AppError::internal)?;
        run_migrations(&pool).await.map_err(AppError::internal)?;
        let executor = QueryExecutor::with_policy(pool, RetryPolicy::from(config.retry));
        Ok(Self::with_executor(executor))
    }

    pub fn with_executor(executor: QueryExecutor) -> Self {
        Self {
            selector: PgPunishmentSelector::new(executor.clone()),
            drafter: PgPunishmentDrafter::new(executor.clone()),
            revoker: PgPunishmentRevoker::new(executor.clone()),
            accounts: PgAccountHistory::new(executor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bans_common::{AppSettings, Environment, RetryConfig};

    fn config_with_url(url: &str) -> AppConfig {
        AppConfig {
            app: AppSettings {
                name: "bans".to_string(),
                env: Environment::Development,
            },
            database: bans_common::DatabaseConfig {
                url: url.to_string(),
                max_connections: 2,
                min_connections: 0,
                acquire_timeout_secs: 1,
            },
            retry: RetryConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_connect_reports_bad_url_as_internal() {
        let err = PunishmentStore::connect(&config_with_url("not a url"))
            .await
            .err()
            .expect("an unparseable url cannot connect");
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(!err.is_retryable());
    }
}
