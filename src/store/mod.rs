mod lock;

use std::time::Duration;

pub use lock::{EntityLock, LockGuard};

use crate::db::DbPool;
use crate::error::AppError;

/// Thin wrapper over the pool that gives the rest of the engine a single
/// place to reason about per-entity locking instead of reaching for
/// `sqlx::query` directly.
#[derive(Clone)]
pub struct Store {
    pub pool: DbPool,
    lock: EntityLock,
}

impl Store {
    pub fn new(pool: DbPool) -> Self {
        let lock = EntityLock::new(pool.clone());
        Store { pool, lock }
    }

    /// Acquire the advisory lock keyed by `(kind, id)`, run `f`, then release.
    /// `wait` bounds acquisition; `hold` bounds how long the lock is honored
    /// once acquired — if `f` runs longer than `hold` the guard's connection
    /// is dropped back to the pool (which clears the advisory lock) and the
    /// caller gets `AppError::LockLost` instead of whatever `f` returned.
    pub async fn with_lock<T, F, Fut>(
        &self,
        kind: &str,
        id: i64,
        wait: Duration,
        hold: Duration,
        f: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, AppError>>,
    {
        let guard = self.lock.acquire(kind, id, wait).await?;
        match tokio::time::timeout(hold, f()).await {
            Ok(result) => {
                guard.release().await;
                result
            }
            Err(_) => {
                guard.force_release().await;
                Err(AppError::LockLost(format!(
                    "lock on {kind}:{id} held past its hold budget"
                )))
            }
        }
    }
}
