//! PostgreSQL implementation of AccountHistory and AccountRecorder
//!
//! Known accounts come back oldest first. Alt detection reads them as the
//! order in which identities and addresses were picked up.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use bans_core::{AccountHistory, AccountRecorder, KnownAccount, NetworkAddress, RepoResult, Victim};

use crate::execute::QueryExecutor;
use crate::models::KnownAccountModel;

/// PostgreSQL implementation of AccountHistory
#[derive(Clone)]
pub struct PgAccountHistory {
    executor: QueryExecutor,
}

impl PgAccountHistory {
    /// Create a new PgAccountHistory
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

/// Build the known-accounts query for a victim
pub(crate) fn known_accounts_query(victim: &Victim) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT a.uuid, a.address, n.name, a.updated \
         FROM addresses a INNER JOIN latest_names n ON a.uuid = n.uuid WHERE ",
    );

    match *victim {
        Victim::Player { uuid } => {
            builder.push("a.uuid = ").push_bind(uuid);
        }
        Victim::Address { address } => {
            builder.push("a.address = ").push_bind(address.to_bytes());
        }
        Victim::Composite { uuid, address } => {
            builder
                .push("(a.uuid = ")
                .push_bind(uuid)
                .push(" OR a.address = ")
                .push_bind(address.to_bytes())
                .push(")");
        }
    }

    builder.push(" ORDER BY a.updated ASC, a.uuid ASC, a.address ASC");
    builder
}

#[async_trait]
impl AccountHistory for PgAccountHistory {
    #[instrument(skip(self))]
    async fn known_accounts(&self, victim: &Victim) -> RepoResult<Vec<KnownAccount>> {
        let victim = *victim;
        let models = self
            .executor
            .query(move |conn| {
                Box::pin(async move {
                    let mut builder = known_accounts_query(&victim);
                    builder
                        .build_query_as::<KnownAccountModel>()
                        .fetch_all(conn)
                        .await
                })
            })
            .await?;

        debug!(count = models.len(), "known accounts selected");
        models.into_iter().map(KnownAccount::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, uuid: Uuid, recorded: DateTime<Utc>) -> RepoResult<bool> {
        let rows = self
            .executor
            .query_with_retry(move |conn| {
                Box::pin(async move {
                    let result = sqlx::query(
                        r"
                        DELETE FROM addresses WHERE uuid = $1 AND updated = $2
                        ",
                    )
                    .bind(uuid)
                    .bind(recorded)
                    .execute(conn)
                    .await?;
                    Ok(result.rows_affected())
                })
            })
            .await?;

        if rows == 0 {
            debug!("no account matched; it was re-observed or already removed");
        } else {
            info!(rows, "known account deleted");
        }
        Ok(rows != 0)
    }
}

#[async_trait]
impl AccountRecorder for PgAccountHistory {
    #[instrument(skip(self))]
    async fn record_observation(
        &self,
        uuid: Uuid,
        address: NetworkAddress,
        name: &str,
    ) -> RepoResult<KnownAccount> {
        let name = name.to_string();
        let address_bytes = address.to_bytes();

        let recorded_name = name.clone();
        let updated = self
            .executor
            .query_with_retry(move |conn| {
                let name = name.clone();
                let address_bytes = address_bytes.clone();
                Box::pin(async move {
                    sqlx::query(
                        r"
                        INSERT INTO latest_names (uuid, name, updated)
                        VALUES ($1, $2, NOW())
                        ON CONFLICT (uuid) DO UPDATE SET name = EXCLUDED.name, updated = EXCLUDED.updated
                        ",
                    )
                    .bind(uuid)
                    .bind(name)
                    .execute(&mut *conn)
                    .await?;

                    sqlx::query_scalar::<_, DateTime<Utc>>(
                        r"
                        INSERT INTO addresses (uuid, address, updated)
                        VALUES ($1, $2, NOW())
                        ON CONFLICT (uuid, address) DO UPDATE SET updated = EXCLUDED.updated
                        RETURNING updated
                        ",
                    )
                    .bind(uuid)
                    .bind(address_bytes)
                    .fetch_one(conn)
                    .await
                })
            })
            .await?;

        Ok(KnownAccount {
            uuid,
            latest_name: recorded_name,
            address,
            updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAccountHistory>();
    }

    #[test]
    fn test_player_query() {
        let sql = known_accounts_query(&Victim::player(Uuid::new_v4())).sql().to_string();
        assert!(sql.contains("WHERE a.uuid = $1 ORDER BY"));
    }

    #[test]
    fn test_address_query() {
        let victim = Victim::address("192.0.2.55".parse().unwrap());
        let sql = known_accounts_query(&victim).sql().to_string();
        assert!(sql.contains("WHERE a.address = $1 ORDER BY"));
    }

    #[test]
    fn test_composite_query_is_union() {
        let victim = Victim::composite(Uuid::new_v4(), "192.0.2.55".parse().unwrap());
        let sql = known_accounts_query(&victim).sql().to_string();
        assert!(sql.contains("WHERE (a.uuid = $1 OR a.address = $2)"));
    }

    #[test]
    fn test_oldest_first() {
        let sql = known_accounts_query(&Victim::player(Uuid::new_v4())).sql().to_string();
        assert!(sql.ends_with("ORDER BY a.updated ASC, a.uuid ASC, a.address ASC"));
    }
}
