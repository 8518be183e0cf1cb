//! Storage adapters are synchronous (SQLite behind a mutex, plain file I/O).
//! Handlers hand those calls to the blocking pool so a slow disk or a busy
//! database never stalls the async workers.

use crate::domain::error::{ApiError, ApiResult};
use shared_types::StoreError;

/// Run a storage call on the blocking pool and map its error.
pub async fn run_blocking<T, F>(call: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::from)
}
