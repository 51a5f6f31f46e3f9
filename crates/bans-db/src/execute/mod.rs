//! Query execution layer
//!
//! Two entry points: [`QueryExecutor::query`] for reads and
//! [`QueryExecutor::query_with_retry`] for transactional writes. Both retry
//! transient infrastructure failures under a bounded [`RetryPolicy`].

mod executor;
mod retry;

pub use executor::QueryExecutor;
pub use retry::{is_transient, run_with_policy, RetryPolicy};
