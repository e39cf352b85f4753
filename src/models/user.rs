use chrono::{DateTime, Utc};
use rand::RngExt;
use sqlx::FromRow;

use crate::db::DbPool;

#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)] // Fields populated by SELECT * via sqlx
pub struct User {
    pub id: i64,
    pub login: String,
    pub password_hash: Option<String>,
    pub api_token: Option<String>,
    pub rating: i32,
    pub games_played: i32,
    pub k_factor: i32,
    pub current_game_id: Option<i64>,
    pub in_search: bool,
    pub current_session_id: Option<String>,
    pub last_session_change_time: Option<DateTime<Utc>>,
    pub avatar_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_ids(pool: &DbPool, ids: &[i64]) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_login(pool: &DbPool, login: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = $1")
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &DbPool,
        login: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (login, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(login)
        .bind(password_hash)
        .fetch_one(pool)
        .await
    }

    pub fn display_name(&self) -> &str {
        &self.login
    }

    pub async fn find_by_api_token(
        pool: &DbPool,
        token: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE api_token = $1")
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    pub async fn generate_api_token(pool: &DbPool, user_id: i64) -> Result<User, sqlx::Error> {
        let token = generate_token();
        sqlx::query_as::<_, User>(
            "UPDATE users SET api_token = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(&token)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    pub async fn set_in_search(
        pool: &DbPool,
        user_id: i64,
        in_search: bool,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET in_search = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(in_search)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    pub async fn set_current_game(
        pool: &DbPool,
        user_id: i64,
        game_id: Option<i64>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET current_game_id = $1, in_search = false, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(game_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Records a fresh session binding. `last_session_change_time` is a plain
    /// audit timestamp of the last rebind; the Session Router's own
    /// `bind_session` (in-memory, per-process) is what actually settles a
    /// race between two sessions for the same user, by evicting the older one.
    pub async fn set_current_session(
        pool: &DbPool,
        user_id: i64,
        session_id: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET current_session_id = $1, last_session_change_time = NOW(), updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    pub async fn apply_rating_result(
        pool: &DbPool,
        user_id: i64,
        new_rating: i32,
        new_games_played: i32,
        new_k_factor: i32,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET rating = $1, games_played = $2, k_factor = $3, updated_at = NOW() WHERE id = $4 RETURNING *",
        )
        .bind(new_rating)
        .bind(new_games_played)
        .bind(new_k_factor)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}

fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..22)
        .map(|_| {
            let idx = rng.random_range(0..62);
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789"[idx] as char
        })
        .collect()
}
