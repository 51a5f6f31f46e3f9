//! Query executor - the single path through which all storage access flows
//!
//! A unit of work is a closure that receives a connection and returns a boxed
//! future. The executor owns the connection or transaction for exactly the
//! duration of one attempt and never hands it out beyond that.

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use bans_core::RepoResult;

use super::retry::{run_with_policy, RetryPolicy};

/// Executes units of work against the pool with retry
#[derive(Clone)]
pub struct QueryExecutor {
    pool: PgPool,
    policy: RetryPolicy,
}

impl QueryExecutor {
    /// Create a new QueryExecutor with the default retry policy
    pub fn new(pool: PgPool) -> Self {
        Self::with_policy(pool, RetryPolicy::default())
    }

    pub fn with_policy(pool: PgPool, policy: RetryPolicy) -> Self {
        Self { pool, policy }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run a read-only unit of work on a pooled connection, outside any
    /// explicit transaction. Transient failures re-run the work on a fresh
    /// connection.
    #[instrument(skip_all)]
    pub async fn query<T, F>(&self, work: F) -> RepoResult<T>
    where
        T: Send,
        F: for<'c> Fn(&'c mut PgConnection) -> BoxFuture<'c, Result<T, sqlx::Error>> + Send + Sync,
    {
        let pool = &self.pool;
        let work = &work;
        run_with_policy(&self.policy, "query", move || async move {
            let mut conn = pool.acquire().await?;
            work(&mut *conn).await
        })
        .await
    }

    /// Run a unit of work inside one serializable transaction.
    ///
    /// Serialization failures and deadlocks roll the transaction back and re-run
    /// the work from scratch. A statement that matches zero rows is not a failure;
    /// the work reports it in its own return value.
    #[instrument(skip_all)]
    pub async fn query_with_retry<T, F>(&self, work: F) -> RepoResult<T>
    where
        T: Send,
        F: for<'c> Fn(&'c mut PgConnection) -> BoxFuture<'c, Result<T, sqlx::Error>> + Send + Sync,
    {
        let pool = &self.pool;
        let work = &work;
        run_with_policy(&self.policy, "query_with_retry", move || async move {
            let mut tx = pool.begin().await?;
            sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
                .execute(&mut *tx)
                .await?;
            let value = work(&mut *tx).await?;
            tx.commit().await.map_err(commit_failure)?;
            Ok(value)
        })
        .await
    }
}

/// A commit that fails without a database verdict may or may not have been
/// applied, so it must not be re-run.
fn commit_failure(error: sqlx::Error) -> sqlx::Error {
    match error {
        sqlx::Error::Database(_) => error,
        other => sqlx::Error::Protocol(format!("commit outcome unknown: {other}")),
    }
}
