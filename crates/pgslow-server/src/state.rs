use std::future::Future;

use tokio_util::sync::CancellationToken;

use pgslow_core::StatsRepository;

use crate::cache::ResponseCache;
use crate::error::ApiError;

/// Shared application state for all handlers.
///
/// Generic over the executor so tests can route requests to an in-memory
/// double. Cloning is cheap: the repository wraps a pooled executor and the
/// cache is reference-counted internally.
#[derive(Clone)]
pub struct AppState<E> {
    /// Repository for slow query listings and demo seeding
    pub stats_repo: StatsRepository<E>,

    /// Cache for slow query listings
    pub cache: ResponseCache,

    /// Cancellation token for graceful shutdown
    pub shutdown_token: CancellationToken,
}

impl<E> AppState<E> {
    /// Creates a new application state.
    pub fn new(
        stats_repo: StatsRepository<E>,
        cache: ResponseCache,
        shutdown_token: CancellationToken,
    ) -> Self {
        Self {
            stats_repo,
            cache,
            shutdown_token,
        }
    }

    /// Runs `fut` unless shutdown is signalled first.
    ///
    /// On shutdown the future is dropped, which aborts any pending database
    /// call, and the caller gets an error instead of a partial result.
    pub async fn until_shutdown<T>(
        &self,
        fut: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        tokio::select! {
            result = fut => result,
            _ = self.shutdown_token.cancelled() => Err(ApiError::ServiceUnavailable(
                "Server is shutting down".to_string(),
            )),
        }
    }
}
