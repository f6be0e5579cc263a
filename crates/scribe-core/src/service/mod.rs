//! Application services - the query and mutation surfaces over the post
//! store.
//!
//! Services validate before any store call, classify store failures into the
//! domain error taxonomy, and bound every store call with a timeout. Raw
//! driver error text is logged here and never propagated.

mod mutation;
mod query;

pub use mutation::PostMutationService;
pub use query::{Page, PostQueryService, SearchResults};

use std::time::Duration;

use crate::error::{DomainError, RepoError};

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Hard cap on page size for listing and search.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page size used by search when the caller does not pass a limit.
pub const DEFAULT_SEARCH_LIMIT: u64 = 20;

/// Map a repository failure to a domain error. `missing` supplies the error
/// for `RepoError::NotFound`, which only repositories' write paths report.
pub(crate) fn classify_store_error(
    err: RepoError,
    missing: impl FnOnce() -> DomainError,
) -> DomainError {
    match err {
        RepoError::NotFound => missing(),
        RepoError::Connection(msg) => {
            tracing::error!(error = %msg, "store unreachable");
            DomainError::Unavailable
        }
        RepoError::Query(msg) => {
            tracing::error!(error = %msg, "store query failed");
            DomainError::Internal("store query failed".to_string())
        }
        RepoError::Constraint(msg) => {
            tracing::error!(error = %msg, "store constraint violation");
            DomainError::Internal("store rejected the write".to_string())
        }
    }
}

/// Run a store call under the configured timeout. Expiry is reported as a
/// connection failure so it classifies to `Unavailable`.
pub(crate) async fn bounded<T>(
    timeout: Duration,
    op: impl Future<Output = Result<T, RepoError>>,
) -> Result<T, RepoError> {
    tokio::time::timeout(timeout, op)
        .await
        .map_err(|_| RepoError::Connection("store call timed out".to_string()))?
}
