//! Durable, named, cancellable one-shot callbacks. `schedule`/`cancel` are
//! the whole contract; `run_sweep` is the background loop that turns due
//! rows into dispatched callbacks, generalizing the teacher's single-purpose
//! `clock_sweep` into a sweep over five kinds of named timer.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use uuid::Uuid;

use crate::AppState;
use crate::db::DbPool;
use crate::services::engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    FirstMoveTimeout,
    TimeIsUp,
    DisconnectTimeout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerPayload {
    pub game_id: i64,
    pub user_id: Option<i64>,
}

pub async fn schedule(
    pool: &DbPool,
    game_id: i64,
    kind: TimerKind,
    payload: TimerPayload,
    eta: DateTime<Utc>,
) -> Result<String, sqlx::Error> {
    let handle = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO scheduled_tasks (handle, game_id, kind, payload, eta) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&handle)
    .bind(game_id)
    .bind(serde_json::to_string(&kind).unwrap_or_default())
    .bind(serde_json::to_value(&payload).unwrap_or_default())
    .bind(eta)
    .execute(pool)
    .await?;
    Ok(handle)
}

/// Best-effort: marks the row cancelled, but a sweep that already claimed it
/// before the cancel lands still fires — callers must re-check state.
pub async fn cancel(pool: &DbPool, handle: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE scheduled_tasks SET cancelled = true WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn run_sweep(state: AppState) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    loop {
        interval.tick().await;
        if let Err(e) = sweep_once(&state).await {
            tracing::error!("timer sweep error: {e}");
        }
    }
}

async fn sweep_once(state: &AppState) -> Result<(), sqlx::Error> {
    let rows = sqlx::query(
        "SELECT handle, game_id, kind, payload FROM scheduled_tasks
         WHERE cancelled = false AND claimed_at IS NULL AND eta <= NOW()
         ORDER BY eta ASC LIMIT 100",
    )
    .fetch_all(&state.db)
    .await?;

    for row in rows {
        let handle: String = row.get("handle");
        let claimed = sqlx::query(
            "UPDATE scheduled_tasks SET claimed_at = NOW()
             WHERE handle = $1 AND claimed_at IS NULL
             RETURNING handle",
        )
        .bind(&handle)
        .fetch_optional(&state.db)
        .await?;
        if claimed.is_none() {
            continue;
        }

        let game_id: i64 = row.get("game_id");
        let kind_raw: String = row.get("kind");
        let payload_raw: serde_json::Value = row.get("payload");
        let Ok(kind) = serde_json::from_str::<TimerKind>(&kind_raw) else {
            tracing::error!("timer {handle}: unreadable kind {kind_raw}");
            continue;
        };
        let Ok(payload) = serde_json::from_value::<TimerPayload>(payload_raw) else {
            tracing::error!("timer {handle}: unreadable payload");
            continue;
        };

        let state = state.clone();
        let _ = state
            .normal_priority_tx
            .send(NormalPriorityTask { handle, game_id, kind, payload })
            .await;
    }
    Ok(())
}

/// Dispatched into the `normal` priority worker pool (§5) so timeout
/// bookkeeping never starves the `high` pool that moves run on.
pub struct NormalPriorityTask {
    pub handle: String,
    pub game_id: i64,
    pub kind: TimerKind,
    pub payload: TimerPayload,
}

pub async fn run_normal_priority_worker(
    state: AppState,
    mut rx: tokio::sync::mpsc::Receiver<NormalPriorityTask>,
) {
    while let Some(task) = rx.recv().await {
        if let Err(e) = dispatch(&state, task).await {
            tracing::error!("normal-priority task failed: {e}");
        }
    }
}

async fn dispatch(state: &AppState, task: NormalPriorityTask) -> Result<(), crate::error::AppError> {
    match task.kind {
        TimerKind::FirstMoveTimeout => engine::on_first_move_timed_out(state, task.game_id).await,
        TimerKind::TimeIsUp => {
            let user_id = task
                .payload
                .user_id
                .ok_or_else(|| crate::error::AppError::Internal("time_is_up timer missing user_id".into()))?;
            engine::on_time_is_up(state, user_id, task.game_id).await
        }
        TimerKind::DisconnectTimeout => {
            let user_id = task.payload.user_id.ok_or_else(|| {
                crate::error::AppError::Internal("disconnect timer missing user_id".into())
            })?;
            engine::on_disconnect_timed_out(state, user_id, task.game_id).await
        }
    }
}
