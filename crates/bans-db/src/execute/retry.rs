//! Retry policy for transient database failures
//!
//! Only failures that say nothing about the unit of work itself are retried:
//! lost connections, pool exhaustion, serialization failures and deadlocks.
//! A retried unit of work always starts again from scratch.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, error, warn};

use bans_common::{ConfigError, RetryConfig};
use bans_core::{DomainError, RepoResult};

use crate::repositories::map_db_error;

/// SQLSTATE serialization_failure
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE deadlock_detected
const DEADLOCK_DETECTED: &str = "40P01";
/// SQLSTATE class 08, connection exception
const CONNECTION_EXCEPTION_CLASS: &str = "08";

/// Bounded exponential backoff with jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(RetryConfig::default())
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(config: RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

impl RetryPolicy {
    /// Load from `RETRY_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        RetryConfig::from_env().map(Self::from)
    }

    /// Run every unit of work exactly once
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Upper bound of the delay after the given failed attempt (1-based)
    pub fn backoff_ceiling(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Delay after the given failed attempt, jittered into `[ceiling / 2, ceiling]`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let ceiling = u64::try_from(self.backoff_ceiling(attempt).as_micros()).unwrap_or(u64::MAX);
        let jittered = rand::thread_rng().gen_range(ceiling / 2..=ceiling);
        Duration::from_micros(jittered)
    }
}

/// Check whether an error is worth retrying with a fresh connection or transaction
pub fn is_transient(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| {
            code == SERIALIZATION_FAILURE
                || code == DEADLOCK_DETECTED
                || code.starts_with(CONNECTION_EXCEPTION_CLASS)
        }),
        _ => false,
    }
}

/// Run `attempt` until it succeeds, fails permanently, or the policy runs out
pub async fn run_with_policy<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut attempt: F,
) -> RepoResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(operation, attempts, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if is_transient(&e) => {
                if attempts >= policy.max_attempts {
                    error!(operation, attempts, error = %e, "retries exhausted");
                    return Err(DomainError::RetriesExhausted {
                        attempts,
                        message: e.to_string(),
                    });
                }
                let delay = policy.delay_for(attempts);
                warn!(operation, attempts, ?delay, error = %e, "transient failure, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(map_db_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    fn connection_reset() -> sqlx::Error {
        sqlx::Error::Io(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
    }

    #[test]
    fn test_classification() {
        assert!(is_transient(&connection_reset()));
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(is_transient(&sqlx::Error::WorkerCrashed));
        assert!(!is_transient(&sqlx::Error::PoolClosed));
        assert!(!is_transient(&sqlx::Error::RowNotFound));
        assert!(!is_transient(&sqlx::Error::ColumnNotFound("id".to_string())));
    }

    #[test]
    fn test_backoff_ceiling_grows_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_millis(20),
            max_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.backoff_ceiling(1), Duration::from_millis(20));
        assert_eq!(policy.backoff_ceiling(2), Duration::from_millis(40));
        assert_eq!(policy.backoff_ceiling(3), Duration::from_millis(80));
        assert_eq!(policy.backoff_ceiling(4), Duration::from_millis(100));
        assert_eq!(policy.backoff_ceiling(64), Duration::from_millis(100));
    }

    #[test]
    fn test_delay_within_jitter_bounds() {
        let policy = RetryPolicy::default();
        for attempt in 1..=6 {
            let ceiling = policy.backoff_ceiling(attempt);
            for _ in 0..50 {
                let delay = policy.delay_for(attempt);
                assert!(delay <= ceiling);
                assert!(delay >= ceiling / 2 - Duration::from_micros(1));
            }
        }
    }

    #[test]
    fn test_from_config() {
        let policy = RetryPolicy::from(RetryConfig {
            max_attempts: 0,
            base_delay_ms: 5,
            max_delay_ms: 50,
        });
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.base_delay, Duration::from_millis(5));
        assert_eq!(RetryPolicy::no_retry().max_attempts, 1);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let calls = AtomicU32::new(0);
        let result = run_with_policy(&fast_policy(5), "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(connection_reset())
                } else {
                    Ok(n)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_is_terminal() {
        let calls = AtomicU32::new(0);
        let err = run_with_policy(&fast_policy(3), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(sqlx::Error::PoolTimedOut) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(err, DomainError::RetriesExhausted { attempts: 3, .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let calls = AtomicU32::new(0);
        let err = run_with_policy(&fast_policy(5), "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(sqlx::Error::RowNotFound) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
