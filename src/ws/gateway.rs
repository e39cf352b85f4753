//! Validates and dispatches inbound client events to the priority worker
//! pools; forwards engine/session-router emissions back out over the
//! socket. Grounded on the teacher's `ws::live` — one long-lived socket per
//! authenticated user rather than one per game, since chess's inbound
//! events already carry `game_id` in-band (§6).
//!
//! `connect{request_type:"game"}` forks on whether the caller is one of the
//! two players: a player gets the reconnect path; anyone else joins the
//! game's spectator room and gets a one-off snapshot, mirroring the
//! original server's `join_room` + `send_game_info` split.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::identity::CurrentUser;
use crate::models::game::{Game, GameState};
use crate::models::user::User;
use crate::services::session_router::Target;
use crate::services::worker_pool::{HighPriorityTask, LowPriorityTask, SearchTask};
use crate::ws::events::{ClientEvent, ServerEvent};

pub async fn ws_upgrade(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, current_user.user)))
}

async fn handle_socket(socket: WebSocket, state: AppState, user: User) {
    let (mut ws_sink, mut ws_stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    let session_id = Uuid::new_v4().to_string();

    state.router.bind_session(user.id, session_id.clone(), tx.clone()).await;
    let _ = User::set_current_session(&state.db, user.id, Some(&session_id)).await;

    state
        .router
        .emit(
            Target::Session(session_id.clone()),
            ServerEvent::SetData {
                nickname: user.display_name().to_string(),
                rating: user.rating,
            },
        )
        .await;

    let forward_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let Ok(text) = serde_json::to_string(&event) else { continue };
            if ws_sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut spectating: Vec<i64> = Vec::new();

    while let Some(Ok(msg)) = ws_stream.next().await {
        let Message::Text(text) = msg else {
            if matches!(msg, Message::Close(_)) {
                break;
            }
            continue;
        };
        let Ok(event) = serde_json::from_str::<ClientEvent>(&text) else {
            continue;
        };
        dispatch(&state, user.id, &session_id, event, &mut spectating).await;
    }

    forward_task.abort();
    state.router.unbind_session(user.id, &session_id).await;
    for game_id in spectating {
        state.router.leave_room(game_id, &tx).await;
    }

    if let Ok(current) = User::find_by_id(&state.db, user.id).await {
        if let Some(game_id) = current.current_game_id {
            let _ = state
                .low_priority_tx
                .send(LowPriorityTask::OnDisconnect { user_id: user.id, game_id })
                .await;
        }
    }
    tracing::debug!("ws closed: user={}", user.id);
}

async fn dispatch(
    state: &AppState,
    user_id: i64,
    session_id: &str,
    event: ClientEvent,
    spectating: &mut Vec<i64>,
) {
    let result = match event {
        ClientEvent::SearchGame { time_control_seconds, game_id } => {
            let time_control_seconds = match (time_control_seconds, game_id) {
                (Some(s), _) => Some(s),
                (None, Some(game_id)) => Game::find_by_id(&state.db, game_id)
                    .await
                    .ok()
                    .map(|g| (g.total_clock_micros / 1_000_000) as i32),
                (None, None) => None,
            };
            match time_control_seconds {
                Some(time_control_seconds) => {
                    state
                        .search_tx
                        .send(SearchTask::Search { user_id, time_control_seconds })
                        .await
                }
                None => Ok(()),
            }
        }
        ClientEvent::CancelSearch {} => state.search_tx.send(SearchTask::CancelSearch { user_id }).await,
        ClientEvent::MakeMove { game_id, san } => {
            state
                .high_priority_tx
                .send(HighPriorityTask::MakeMove { user_id, game_id, san })
                .await
        }
        ClientEvent::Resign { game_id } => {
            state.high_priority_tx.send(HighPriorityTask::Resign { user_id, game_id }).await
        }
        ClientEvent::MakeDrawOffer { game_id } => {
            state
                .low_priority_tx
                .send(LowPriorityTask::MakeDrawOffer { user_id, game_id })
                .await
        }
        ClientEvent::AcceptDrawOffer { game_id } => {
            state
                .high_priority_tx
                .send(HighPriorityTask::AcceptDrawOffer { user_id, game_id })
                .await
        }
        ClientEvent::DeclineDrawOffer { game_id } => {
            state
                .high_priority_tx
                .send(HighPriorityTask::DeclineDrawOffer { user_id, game_id })
                .await
        }
        ClientEvent::Connect { request_type, game_id } => {
            if request_type != "game" {
                Ok(())
            } else if let Some(game_id) = game_id {
                match Game::find_by_id(&state.db, game_id).await {
                    Ok(game) if game.white_user_id == user_id || game.black_user_id == user_id => {
                        state
                            .high_priority_tx
                            .send(HighPriorityTask::OnReconnect { user_id, game_id })
                            .await
                    }
                    Ok(game) if game.state() != GameState::Finished => {
                        if let Some(sender) = state.router.sender_for_session(session_id).await {
                            state.router.join_room(game_id, user_id, false, Some(sender)).await;
                            spectating.push(game_id);
                        }
                        state
                            .high_priority_tx
                            .send(HighPriorityTask::SendGameInfo { session_id: session_id.to_string(), game_id })
                            .await
                    }
                    _ => Ok(()),
                }
            } else {
                Ok(())
            }
        }
    };
    if result.is_err() {
        tracing::error!("dropped event for user {user_id}: worker pool channel closed");
    }
}

