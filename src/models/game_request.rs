use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::db::DbPool;

#[derive(Debug, Clone, FromRow)]
pub struct GameRequest {
    pub id: i64,
    pub user_id: i64,
    pub time_control_seconds: i32,
    pub created_at: DateTime<Utc>,
}

impl GameRequest {
    pub async fn create(
        pool: &DbPool,
        user_id: i64,
        time_control_seconds: i32,
    ) -> Result<GameRequest, sqlx::Error> {
        sqlx::query_as::<_, GameRequest>(
            "INSERT INTO game_requests (user_id, time_control_seconds) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(time_control_seconds)
        .fetch_one(pool)
        .await
    }

    pub async fn delete_by_user(pool: &DbPool, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM game_requests WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Candidate pool for a given time control, oldest first so ties break
    /// by ascending request id.
    pub async fn find_by_time_control(
        pool: &DbPool,
        time_control_seconds: i32,
    ) -> Result<Vec<GameRequest>, sqlx::Error> {
        sqlx::query_as::<_, GameRequest>(
            "SELECT * FROM game_requests WHERE time_control_seconds = $1 ORDER BY id ASC",
        )
        .bind(time_control_seconds)
        .fetch_all(pool)
        .await
    }
}
