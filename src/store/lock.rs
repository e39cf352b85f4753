use std::time::Duration;

use sqlx::Row;
use sqlx::pool::PoolConnection;
use sqlx::postgres::Postgres;

use crate::db::DbPool;
use crate::error::AppError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Realizes the Store's per-entity advisory lock on a dedicated connection
/// checked out from the pool.
#[derive(Clone)]
pub struct EntityLock {
    pool: DbPool,
}

impl EntityLock {
    pub fn new(pool: DbPool) -> Self {
        EntityLock { pool }
    }

    fn key(kind: &str, id: i64) -> i64 {
        // hashtext('<kind>:<id>') would be computed server-side; folding it
        // client-side keeps the lock key deterministic without a round trip.
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        use std::hash::{Hash, Hasher};
        format!("{kind}:{id}").hash(&mut hasher);
        hasher.finish() as i64
    }

    pub async fn acquire(&self, kind: &str, id: i64, wait: Duration) -> Result<LockGuard, AppError> {
        let key = Self::key(kind, id);
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(AppError::from)?;

        let deadline = tokio::time::Instant::now() + wait;
        loop {
            let row = sqlx::query("SELECT pg_try_advisory_lock($1) AS locked")
                .bind(key)
                .fetch_one(&mut *conn)
                .await
                .map_err(AppError::from)?;
            if row.get::<bool, _>("locked") {
                return Ok(LockGuard {
                    conn: Some(conn),
                    key,
                });
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(AppError::LockLost(format!(
                    "timed out waiting for lock on {kind}:{id}"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// Held while a Store operation mutates one entity. Must be released
/// explicitly: `release()` on the happy path (clean `pg_advisory_unlock`),
/// `force_release()` when the guarded work overran its `hold` budget (the
/// connection is closed outright rather than returned to the pool, which
/// ends the session and drops every advisory lock held on it).
pub struct LockGuard {
    conn: Option<PoolConnection<Postgres>>,
    key: i64,
}

impl LockGuard {
    pub async fn release(mut self) {
        if let Some(mut conn) = self.conn.take() {
            let _ = sqlx::query("SELECT pg_advisory_unlock($1)")
                .bind(self.key)
                .execute(&mut *conn)
                .await;
        }
    }

    pub async fn force_release(mut self) {
        if let Some(conn) = self.conn.take() {
            let _ = conn.close().await;
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            // Caller didn't go through release()/force_release() — detach so
            // the pool doesn't recycle a connection that may still hold the
            // advisory lock, then let it close on its own.
            conn.detach();
        }
    }
}
