//! Per-priority-class dispatch (§5): `high` for moves and the operations a
//! player is actively waiting on, `low` for disconnect/draw-offer
//! bookkeeping, `search` for matchmaking. `normal` (timeouts) lives in
//! `services::timers` alongside the sweep that feeds it.
//!
//! Each class is one bounded `tokio::mpsc` channel drained by a single
//! `tokio::select!`-shaped loop, grounded on the chesstty session-actor
//! pattern — generalized here from one loop per game to one loop per
//! priority class, since per-game serialization already comes from the
//! Store's advisory lock rather than from a dedicated actor per game.

use crate::AppState;
use crate::services::{engine, matchmaker};

pub enum HighPriorityTask {
    StartGame { game_id: i64 },
    MakeMove { user_id: i64, game_id: i64, san: String },
    Resign { user_id: i64, game_id: i64 },
    AcceptDrawOffer { user_id: i64, game_id: i64 },
    DeclineDrawOffer { user_id: i64, game_id: i64 },
    OnReconnect { user_id: i64, game_id: i64 },
    SendGameInfo { session_id: String, game_id: i64 },
}

pub enum LowPriorityTask {
    OnDisconnect { user_id: i64, game_id: i64 },
    MakeDrawOffer { user_id: i64, game_id: i64 },
}

pub enum SearchTask {
    Search { user_id: i64, time_control_seconds: i32 },
    CancelSearch { user_id: i64 },
}

pub async fn run_high_priority_worker(state: AppState, mut rx: tokio::sync::mpsc::Receiver<HighPriorityTask>) {
    while let Some(task) = rx.recv().await {
        let state = state.clone();
        tokio::spawn(async move {
            let result = match task {
                HighPriorityTask::StartGame { game_id } => engine::start_game(&state, game_id).await,
                HighPriorityTask::MakeMove { user_id, game_id, san } => {
                    engine::make_move(&state, user_id, game_id, san).await
                }
                HighPriorityTask::Resign { user_id, game_id } => engine::resign(&state, user_id, game_id).await,
                HighPriorityTask::AcceptDrawOffer { user_id, game_id } => {
                    engine::accept_draw_offer(&state, user_id, game_id).await
                }
                HighPriorityTask::DeclineDrawOffer { user_id, game_id } => {
                    engine::decline_draw_offer(&state, user_id, game_id).await
                }
                HighPriorityTask::OnReconnect { user_id, game_id } => {
                    engine::on_reconnect(&state, user_id, game_id).await
                }
                HighPriorityTask::SendGameInfo { session_id, game_id } => {
                    engine::send_game_info(&state, &session_id, game_id).await
                }
            };
            if let Err(e) = result {
                tracing::error!("high-priority task failed: {e}");
            }
        });
    }
}

pub async fn run_low_priority_worker(state: AppState, mut rx: tokio::sync::mpsc::Receiver<LowPriorityTask>) {
    while let Some(task) = rx.recv().await {
        let state = state.clone();
        tokio::spawn(async move {
            let result = match task {
                LowPriorityTask::OnDisconnect { user_id, game_id } => {
                    engine::on_disconnect(&state, user_id, game_id).await
                }
                LowPriorityTask::MakeDrawOffer { user_id, game_id } => {
                    engine::make_draw_offer(&state, user_id, game_id).await
                }
            };
            if let Err(e) = result {
                tracing::error!("low-priority task failed: {e}");
            }
        });
    }
}

pub async fn run_search_worker(state: AppState, mut rx: tokio::sync::mpsc::Receiver<SearchTask>) {
    while let Some(task) = rx.recv().await {
        let state = state.clone();
        tokio::spawn(async move {
            let result = match task {
                SearchTask::Search { user_id, time_control_seconds } => {
                    matchmaker::search(&state, user_id, time_control_seconds).await
                }
                SearchTask::CancelSearch { user_id } => matchmaker::cancel_search(&state, user_id).await,
            };
            if let Err(e) = result {
                tracing::error!("search task failed: {e}");
            }
        });
    }
}
