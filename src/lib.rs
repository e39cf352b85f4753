use axum::Router;
use axum::routing::get;

pub mod config;
pub mod db;
pub mod error;
pub mod identity;
pub mod models;
pub mod services;
pub mod store;
pub mod ws;

use services::session_router::SessionRouter;
use services::timers::NormalPriorityTask;
use services::worker_pool::{HighPriorityTask, LowPriorityTask, SearchTask};
use store::Store;

#[derive(Clone)]
pub struct AppState {
    pub db: db::DbPool,
    pub store: Store,
    pub router: SessionRouter,
    pub high_priority_tx: tokio::sync::mpsc::Sender<HighPriorityTask>,
    pub low_priority_tx: tokio::sync::mpsc::Sender<LowPriorityTask>,
    pub search_tx: tokio::sync::mpsc::Sender<SearchTask>,
    pub normal_priority_tx: tokio::sync::mpsc::Sender<NormalPriorityTask>,
    pub first_move_timeout_secs: i64,
    pub disconnect_timeout_secs: i64,
}

/// Builds the router and spawns the background workers (priority pools,
/// timer sweep) that keep it running. Returns the router plus the state so
/// callers (tests, `main`) can reach into it.
pub async fn build_router(pool: db::DbPool, channel_capacity: usize) -> (Router, AppState) {
    build_router_with_timeouts(pool, channel_capacity, 15, 60).await
}

/// Same as `build_router`, with the first-move and disconnect timer
/// durations overridable — useful for tests, the way the teacher's
/// `UserPresence::with_grace_period` lets tests shrink its grace period.
pub async fn build_router_with_timeouts(
    pool: db::DbPool,
    channel_capacity: usize,
    first_move_timeout_secs: i64,
    disconnect_timeout_secs: i64,
) -> (Router, AppState) {
    let (high_tx, high_rx) = tokio::sync::mpsc::channel(channel_capacity);
    let (low_tx, low_rx) = tokio::sync::mpsc::channel(channel_capacity);
    let (search_tx, search_rx) = tokio::sync::mpsc::channel(channel_capacity);
    let (normal_tx, normal_rx) = tokio::sync::mpsc::channel(channel_capacity);

    let state = AppState {
        db: pool.clone(),
        store: Store::new(pool),
        router: SessionRouter::new(),
        high_priority_tx: high_tx,
        low_priority_tx: low_tx,
        search_tx,
        normal_priority_tx: normal_tx,
        first_move_timeout_secs,
        disconnect_timeout_secs,
    };

    tokio::spawn(services::worker_pool::run_high_priority_worker(state.clone(), high_rx));
    tokio::spawn(services::worker_pool::run_low_priority_worker(state.clone(), low_rx));
    tokio::spawn(services::worker_pool::run_search_worker(state.clone(), search_rx));
    tokio::spawn(services::timers::run_normal_priority_worker(state.clone(), normal_rx));
    tokio::spawn(services::timers::run_sweep(state.clone()));

    let app = Router::new()
        .route("/ws", get(ws::gateway::ws_upgrade))
        .route("/up", get(health_check))
        .with_state(state.clone());

    (app, state)
}

async fn health_check() -> &'static str {
    "ok"
}
