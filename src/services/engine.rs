//! Per-game state machine: start, move, resign, draw negotiation,
//! disconnect, timeout, finalize. Grounded on the teacher's
//! `services/game_actions.rs` one-function-per-operation shape (load, lock,
//! mutate, persist, emit outside the lock), renamed to chess vocabulary.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;

use crate::AppState;
use crate::error::AppError;
use crate::models::game::{Color, Game, GameResult, GameState, GameWithPlayers};
use crate::models::user::User;
use crate::services::session_router::Target;
use crate::services::{chess_rules, clock, rating, timers};
use crate::ws::events::ServerEvent;

const LOCK_WAIT: Duration = Duration::from_secs(10);
const LOCK_HOLD: Duration = Duration::from_secs(5);

fn repetition_map(value: &serde_json::Value) -> HashMap<u64, u8> {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| {
                    let key = k.parse::<u64>().ok()?;
                    let count = v.as_u64()? as u8;
                    Some((key, count))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn repetition_value(map: &HashMap<u64, u8>) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
            .collect(),
    )
}

/// Every engine operation enters here exactly once per invocation; queueing
/// onto the priority pools (§5) happens at the gateway / timer-sweep layer,
/// not inside these functions, so they stay plain async fns that can also
/// be called directly (e.g. from tests).
pub async fn enqueue_start_game(state: &AppState, game_id: i64) {
    let state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = start_game(&state, game_id).await {
            tracing::error!("start_game({game_id}) failed: {e}");
        }
    });
}

pub async fn start_game(state: &AppState, game_id: i64) -> Result<(), AppError> {
    let emit = state
        .store
        .with_lock("game", game_id, LOCK_WAIT, LOCK_HOLD, || async {
            let game = Game::find_by_id(&state.db, game_id).await?;
            if game.state() != GameState::Created {
                return Ok(None);
            }
            Game::set_state(&state.db, game_id, GameState::Started).await?;
            let eta = Utc::now() + chrono::Duration::seconds(state.first_move_timeout_secs);
            let handle = timers::schedule(
                &state.db,
                game_id,
                timers::TimerKind::FirstMoveTimeout,
                timers::TimerPayload { game_id, user_id: None },
                eta,
            )
            .await?;
            Game::set_first_move_timeout(&state.db, game_id, Some(&handle), Some(eta)).await?;
            let gwp = Game::find_with_players(&state.db, game_id).await?;
            Ok(Some(gwp))
        })
        .await?;

    let Some(gwp) = emit else { return Ok(()) };
    emit_game_started(state, &gwp).await;
    state
        .router
        .emit(
            Target::User(gwp.white.id),
            ServerEvent::FirstMoveWaiting {
                wait_time: state.first_move_timeout_secs,
            },
        )
        .await;
    Ok(())
}

async fn emit_game_started(state: &AppState, gwp: &GameWithPlayers) {
    for &color in &[Color::White, Color::Black] {
        let (me, opp) = match color {
            Color::White => (&gwp.white, &gwp.black),
            Color::Black => (&gwp.black, &gwp.white),
        };
        let own_clock = gwp.game.clock_micros(color);
        let opp_clock = gwp.game.clock_micros(color.opposite());
        let deltas = rating::deltas(me.rating, opp.rating, me.k_factor);
        state
            .router
            .emit(
                Target::User(me.id),
                ServerEvent::GameStarted {
                    game_id: gwp.game.id,
                    moves: gwp.game.moves().into_iter().map(str::to_string).collect(),
                    color: if color == Color::White { "w" } else { "b" }.to_string(),
                    opp_nickname: opp.display_name().to_string(),
                    opp_rating: opp.rating,
                    own_clock,
                    opp_clock,
                    rating_win: deltas.win,
                    rating_draw: deltas.draw,
                    rating_lose: deltas.lose,
                    can_send_draw_offer: !gwp.game.moves().is_empty(),
                    is_player: true,
                },
            )
            .await;
    }
}

pub async fn make_move(state: &AppState, user_id: i64, game_id: i64, san: String) -> Result<(), AppError> {
    let outcome = state
        .store
        .with_lock("game", game_id, LOCK_WAIT, LOCK_HOLD, || async {
            let game = Game::find_by_id(&state.db, game_id).await?;
            if game.state() != GameState::Started {
                return Ok(None);
            }
            if game.white_user_id != user_id && game.black_user_id != user_id {
                return Ok(None);
            }
            let mover_color = if game.white_user_id == user_id {
                Color::White
            } else {
                Color::Black
            };
            if game.side_to_move() != mover_color {
                return Ok(None);
            }

            let moves = game.moves();
            let pos = match chess_rules::replay(&moves) {
                Ok(pos) => pos,
                Err(e) => {
                    tracing::error!("game {game_id}: {e}");
                    return Ok(None);
                }
            };
            let Some(new_pos) = chess_rules::apply_san(&pos, &san) else {
                return Ok(None);
            };

            let now = Utc::now();

            if let Some(handle) = game.first_move_timeout_id.clone() {
                timers::cancel(&state.db, &handle).await?;
                Game::set_first_move_timeout(&state.db, game_id, None, None).await?;
            }

            let mover_timer_handle = match mover_color {
                Color::White => game.white_time_is_up_id.clone(),
                Color::Black => game.black_time_is_up_id.clone(),
            };
            if let Some(handle) = mover_timer_handle {
                timers::cancel(&state.db, &handle).await?;
                Game::set_time_is_up_timer(&state.db, game_id, mover_color, None, None).await?;
            }

            if let Some(sender) = game.draw_offer_sender {
                if sender != user_id {
                    Game::set_draw_offer_sender(&state.db, game_id, None).await?;
                    state
                        .router
                        .emit(Target::User(sender), ServerEvent::DrawOfferDeclined)
                        .await;
                }
            }

            let had_prior_move = !moves.is_empty();
            let mut white_clock = game.white_clock_micros;
            let mut black_clock = game.black_clock_micros;
            if let Some(last_move_time) = game.last_move_time {
                if had_prior_move {
                    let remaining = clock::subtract_elapsed(
                        match mover_color {
                            Color::White => white_clock,
                            Color::Black => black_clock,
                        },
                        last_move_time,
                        now,
                    );
                    match mover_color {
                        Color::White => white_clock = remaining,
                        Color::Black => black_clock = remaining,
                    }
                }
            }

            let mover_clock_exhausted = clock::is_exhausted(match mover_color {
                Color::White => white_clock,
                Color::Black => black_clock,
            });

            let mut repetition_counts = repetition_map(&game.repetition_counts);
            let hash = chess_rules::zobrist_hash(&new_pos);
            *repetition_counts.entry(hash).or_insert(0) += 1;

            let updated = Game::append_move(
                &state.db,
                game_id,
                &san,
                white_clock,
                black_clock,
                now,
                &repetition_value(&repetition_counts),
            )
            .await?;

            if mover_clock_exhausted {
                return Ok(Some(MoveOutcome {
                    game: updated,
                    terminal: None,
                    time_loss: Some(mover_color),
                    first_move_just_played: false,
                }));
            }

            let opponent_color = mover_color.opposite();
            let opponent_clock = updated.clock_micros(opponent_color);
            let eta = now + chrono::Duration::microseconds(opponent_clock);
            let handle = timers::schedule(
                &state.db,
                game_id,
                timers::TimerKind::TimeIsUp,
                timers::TimerPayload {
                    game_id,
                    user_id: Some(updated.user_id_of(opponent_color)),
                },
                eta,
            )
            .await?;
            Game::set_time_is_up_timer(&state.db, game_id, opponent_color, Some(&handle), Some(eta))
                .await?;

            if !had_prior_move {
                let fm_eta = now + chrono::Duration::seconds(state.first_move_timeout_secs);
                let fm_handle = timers::schedule(
                    &state.db,
                    game_id,
                    timers::TimerKind::FirstMoveTimeout,
                    timers::TimerPayload { game_id, user_id: None },
                    fm_eta,
                )
                .await?;
                Game::set_first_move_timeout(&state.db, game_id, Some(&fm_handle), Some(fm_eta)).await?;
            }

            let terminal = chess_rules::terminal_result(&new_pos, &repetition_counts);
            Ok(Some(MoveOutcome {
                game: updated,
                terminal,
                time_loss: None,
                first_move_just_played: !had_prior_move,
            }))
        })
        .await?;

    let Some(outcome) = outcome else { return Ok(()) };

    let gwp = Game::find_with_players(&state.db, game_id).await?;
    let san_played = gwp.game.moves().last().copied().unwrap_or_default().to_string();
    for &color in &[Color::White, Color::Black] {
        let target_user = gwp.game.user_id_of(color);
        state
            .router
            .emit(
                Target::User(target_user),
                ServerEvent::GameUpdated {
                    san: san_played.clone(),
                    own_clock: gwp.game.clock_micros(color),
                    opp_clock: gwp.game.clock_micros(color.opposite()),
                },
            )
            .await;
    }
    state
        .router
        .emit(
            Target::GameRoom(game_id),
            ServerEvent::GameUpdated {
                san: san_played,
                own_clock: 0,
                opp_clock: 0,
            },
        )
        .await;

    if outcome.first_move_just_played {
        state
            .router
            .emit(
                Target::User(gwp.game.black_user_id),
                ServerEvent::FirstMoveWaiting { wait_time: state.first_move_timeout_secs },
            )
            .await;
    }

    if let Some(mover_color) = outcome.time_loss {
        end_game(
            state,
            game_id,
            GameResult::from_winner(mover_color.opposite()),
            format!(
                "{} ran out of time.",
                match mover_color.opposite() {
                    Color::White => "White",
                    Color::Black => "Black",
                }
            ),
            true,
        )
        .await?;
    } else if let Some(terminal) = outcome.terminal {
        let result = match terminal {
            chess_rules::TerminalResult::Checkmate { winner } => GameResult::from_winner(winner),
            _ => GameResult::Draw,
        };
        end_game(state, game_id, result, terminal.reason(), true).await?;
    }

    Ok(())
}

struct MoveOutcome {
    game: Game,
    terminal: Option<chess_rules::TerminalResult>,
    time_loss: Option<Color>,
    first_move_just_played: bool,
}

pub async fn resign(state: &AppState, user_id: i64, game_id: i64) -> Result<(), AppError> {
    let game = Game::find_by_id(&state.db, game_id).await?;
    if game.state() == GameState::Finished {
        return Ok(());
    }
    if game.white_user_id != user_id && game.black_user_id != user_id {
        return Ok(());
    }
    if game.moves().is_empty() {
        return end_game(state, game_id, GameResult::Cancelled, "Cancelled.".to_string(), false).await;
    }
    let resigner_color = if game.white_user_id == user_id {
        Color::White
    } else {
        Color::Black
    };
    let winner = resigner_color.opposite();
    end_game(
        state,
        game_id,
        GameResult::from_winner(winner),
        format!(
            "{} resigned.",
            match resigner_color {
                Color::White => "White",
                Color::Black => "Black",
            }
        ),
        true,
    )
    .await
}

pub async fn make_draw_offer(state: &AppState, user_id: i64, game_id: i64) -> Result<(), AppError> {
    // A second offer from the other side is treated as acceptance, finalized
    // *after* this lock is released — `accept_draw_offer` takes the same
    // "game" lock and must not be nested inside it.
    let treat_as_accept = state
        .store
        .with_lock("game", game_id, LOCK_WAIT, LOCK_HOLD, || async {
            let game = Game::find_by_id(&state.db, game_id).await?;
            if game.state() != GameState::Started || game.moves().is_empty() {
                return Ok(false);
            }
            match game.draw_offer_sender {
                Some(sender) if sender != user_id => Ok(true),
                Some(_) => Ok(false),
                None => {
                    Game::set_draw_offer_sender(&state.db, game_id, Some(user_id)).await?;
                    if let Some(opponent_id) = opponent_id(&game, user_id) {
                        state
                            .router
                            .emit(Target::User(opponent_id), ServerEvent::DrawOffer)
                            .await;
                    }
                    Ok(false)
                }
            }
        })
        .await?;

    if treat_as_accept {
        accept_draw_offer(state, user_id, game_id).await?;
    }
    Ok(())
}

fn opponent_id(game: &Game, user_id: i64) -> Option<i64> {
    if game.white_user_id == user_id {
        Some(game.black_user_id)
    } else if game.black_user_id == user_id {
        Some(game.white_user_id)
    } else {
        None
    }
}

pub async fn accept_draw_offer(state: &AppState, user_id: i64, game_id: i64) -> Result<(), AppError> {
    let accepted = state
        .store
        .with_lock("game", game_id, LOCK_WAIT, LOCK_HOLD, || async {
            let game = Game::find_by_id(&state.db, game_id).await?;
            if game.state() == GameState::Finished {
                return Ok(false);
            }
            if game.white_user_id != user_id && game.black_user_id != user_id {
                return Ok(false);
            }
            match game.draw_offer_sender {
                Some(sender) if sender != user_id => {
                    Game::set_draw_offer_sender(&state.db, game_id, None).await?;
                    Ok(true)
                }
                _ => Ok(false),
            }
        })
        .await?;

    if accepted {
        end_game(state, game_id, GameResult::Draw, "Draw.".to_string(), true).await?;
    }
    Ok(())
}

pub async fn decline_draw_offer(state: &AppState, user_id: i64, game_id: i64) -> Result<(), AppError> {
    state
        .store
        .with_lock("game", game_id, LOCK_WAIT, LOCK_HOLD, || async {
            let game = Game::find_by_id(&state.db, game_id).await?;
            if game.state() == GameState::Finished {
                return Ok(());
            }
            if game.white_user_id != user_id && game.black_user_id != user_id {
                return Ok(());
            }
            if let Some(sender) = game.draw_offer_sender {
                if sender != user_id {
                    Game::set_draw_offer_sender(&state.db, game_id, None).await?;
                    state
                        .router
                        .emit(Target::User(sender), ServerEvent::DrawOfferDeclined)
                        .await;
                }
            }
            Ok(())
        })
        .await
}

pub async fn on_disconnect(state: &AppState, user_id: i64, game_id: i64) -> Result<(), AppError> {
    decline_draw_offer(state, user_id, game_id).await?;

    let emitted = state
        .store
        .with_lock("game", game_id, LOCK_WAIT, LOCK_HOLD, || async {
            let game = Game::find_by_id(&state.db, game_id).await?;
            if game.moves().is_empty() || game.state() == GameState::Finished {
                return Ok(None);
            }
            let color = if game.white_user_id == user_id {
                Color::White
            } else if game.black_user_id == user_id {
                Color::Black
            } else {
                return Ok(None);
            };
            let existing = match color {
                Color::White => &game.white_disconnect_timeout_id,
                Color::Black => &game.black_disconnect_timeout_id,
            };
            if existing.is_some() {
                return Ok(None);
            }

            let eta = Utc::now() + chrono::Duration::seconds(state.disconnect_timeout_secs);
            let handle = timers::schedule(
                &state.db,
                game_id,
                timers::TimerKind::DisconnectTimeout,
                timers::TimerPayload {
                    game_id,
                    user_id: Some(user_id),
                },
                eta,
            )
            .await?;
            Game::set_disconnect_timeout(&state.db, game_id, color, Some(&handle), Some(eta)).await?;
            Ok(opponent_id(&game, user_id))
        })
        .await?;

    if let Some(opponent) = emitted {
        state
            .router
            .emit(
                Target::User(opponent),
                ServerEvent::OppDisconnected {
                    wait_time: state.disconnect_timeout_secs,
                },
            )
            .await;
    }
    Ok(())
}

pub async fn on_reconnect(state: &AppState, user_id: i64, game_id: i64) -> Result<(), AppError> {
    let gwp = Game::find_with_players(&state.db, game_id).await?;
    if !gwp.has_player(user_id) {
        return Ok(());
    }
    emit_game_started(state, &gwp).await;

    let color = gwp.color_of(user_id).expect("checked has_player above");
    let (own_disconnect_handle, opp_disconnect_eta, opp_id) = {
        let opp_color = color.opposite();
        let own_handle = match color {
            Color::White => gwp.game.white_disconnect_timeout_id.clone(),
            Color::Black => gwp.game.black_disconnect_timeout_id.clone(),
        };
        let opp_eta = match opp_color {
            Color::White => gwp.game.white_disconnect_timeout_eta,
            Color::Black => gwp.game.black_disconnect_timeout_eta,
        };
        (own_handle, opp_eta, gwp.opponent_of(user_id).map(|u| u.id))
    };

    if let Some(handle) = own_disconnect_handle {
        timers::cancel(&state.db, &handle).await?;
        Game::set_disconnect_timeout(&state.db, game_id, color, None, None).await?;
        if let Some(opp_id) = opp_id {
            state
                .router
                .emit(Target::User(opp_id), ServerEvent::OppReconnected)
                .await;
        }
    }

    if let Some(eta) = gwp.game.first_move_timeout_eta {
        if gwp.game.side_to_move() == color {
            let wait_time = (eta - Utc::now()).num_seconds().max(0);
            state
                .router
                .emit(Target::User(user_id), ServerEvent::FirstMoveWaiting { wait_time })
                .await;
        }
    }

    if let Some(eta) = opp_disconnect_eta {
        let wait_time = (eta - Utc::now()).num_seconds().max(0);
        state
            .router
            .emit(Target::User(user_id), ServerEvent::OppDisconnected { wait_time })
            .await;
    }

    Ok(())
}

/// Snapshot sent to a non-participant who connects to a live game as a
/// spectator. Reuses `GameStarted`'s shape with `is_player: false`, the way
/// the original sends the same `game_started` payload to spectators and
/// players alike, distinguished only by that flag.
pub async fn send_game_info(state: &AppState, session_id: &str, game_id: i64) -> Result<(), AppError> {
    let gwp = Game::find_with_players(&state.db, game_id).await?;
    state
        .router
        .emit(
            Target::Session(session_id.to_string()),
            ServerEvent::GameStarted {
                game_id: gwp.game.id,
                moves: gwp.game.moves().into_iter().map(str::to_string).collect(),
                color: "w".to_string(),
                opp_nickname: gwp.black.display_name().to_string(),
                opp_rating: gwp.black.rating,
                own_clock: gwp.game.clock_micros(Color::White),
                opp_clock: gwp.game.clock_micros(Color::Black),
                rating_win: 0,
                rating_draw: 0,
                rating_lose: 0,
                can_send_draw_offer: false,
                is_player: false,
            },
        )
        .await;
    Ok(())
}

pub async fn on_first_move_timed_out(state: &AppState, game_id: i64) -> Result<(), AppError> {
    end_game(state, game_id, GameResult::Cancelled, "Cancelled.".to_string(), false).await
}

pub async fn on_disconnect_timed_out(state: &AppState, user_id: i64, game_id: i64) -> Result<(), AppError> {
    let game = Game::find_by_id(&state.db, game_id).await?;
    if game.state() == GameState::Finished {
        return Ok(());
    }
    let disconnected_color = if game.white_user_id == user_id {
        Color::White
    } else if game.black_user_id == user_id {
        Color::Black
    } else {
        return Ok(());
    };
    let winner = disconnected_color.opposite();
    end_game(
        state,
        game_id,
        GameResult::from_winner(winner),
        format!(
            "{} player disconnected. {} won.",
            match disconnected_color {
                Color::White => "White",
                Color::Black => "Black",
            },
            match winner {
                Color::White => "White",
                Color::Black => "Black",
            }
        ),
        true,
    )
    .await
}

pub async fn on_time_is_up(state: &AppState, user_id: i64, game_id: i64) -> Result<(), AppError> {
    let game = Game::find_by_id(&state.db, game_id).await?;
    if game.state() == GameState::Finished {
        return Ok(());
    }
    let flagged_color = if game.white_user_id == user_id {
        Color::White
    } else if game.black_user_id == user_id {
        Color::Black
    } else {
        return Ok(());
    };

    // Re-check: a cancelled timer may still fire (§4.2). If time remains,
    // this is the spurious case and we no-op rather than finalize.
    let remaining = if let Some(last_move_time) = game.last_move_time {
        clock::subtract_elapsed(game.clock_micros(flagged_color), last_move_time, Utc::now())
    } else {
        game.clock_micros(flagged_color)
    };
    if !clock::is_exhausted(remaining) {
        return Ok(());
    }

    let winner = flagged_color.opposite();
    let pos = chess_rules::replay(&game.moves()).map_err(AppError::Internal)?;
    let result = if chess_rules::is_insufficient_material(&pos) {
        GameResult::Draw
    } else {
        GameResult::from_winner(winner)
    };
    let reason = if result == GameResult::Draw {
        format!(
            "{} ran out of time. Draw due to insufficient material.",
            match flagged_color {
                Color::White => "White",
                Color::Black => "Black",
            }
        )
    } else {
        format!(
            "{} ran out of time. {} won.",
            match flagged_color {
                Color::White => "White",
                Color::Black => "Black",
            },
            match winner {
                Color::White => "White",
                Color::Black => "Black",
            }
        )
    };
    end_game(state, game_id, result, reason, true).await
}

pub async fn end_game(
    state: &AppState,
    game_id: i64,
    result: GameResult,
    reason: String,
    update_ratings: bool,
) -> Result<(), AppError> {
    let finalized = state
        .store
        .with_lock("game", game_id, LOCK_WAIT, LOCK_HOLD, || async {
            let game = Game::find_by_id(&state.db, game_id).await?;
            if game.state() == GameState::Finished {
                return Ok(None);
            }

            for handle in [
                game.first_move_timeout_id.clone(),
                game.white_time_is_up_id.clone(),
                game.black_time_is_up_id.clone(),
                game.white_disconnect_timeout_id.clone(),
                game.black_disconnect_timeout_id.clone(),
            ]
            .into_iter()
            .flatten()
            {
                timers::cancel(&state.db, &handle).await?;
            }

            Game::set_finished(&state.db, game_id, result).await?;
            User::set_current_game(&state.db, game.white_user_id, None).await?;
            User::set_current_game(&state.db, game.black_user_id, None).await?;

            let white = User::find_by_id(&state.db, game.white_user_id).await?;
            let black = User::find_by_id(&state.db, game.black_user_id).await?;

            let (white_delta, black_delta) = if update_ratings {
                let white_deltas = rating::deltas(white.rating, black.rating, white.k_factor);
                let black_deltas = rating::deltas(black.rating, white.rating, black.k_factor);
                let (wd, bd) = match result {
                    GameResult::WhiteWins => (white_deltas.win, black_deltas.lose),
                    GameResult::BlackWins => (white_deltas.lose, black_deltas.win),
                    GameResult::Draw => (white_deltas.draw, black_deltas.draw),
                    GameResult::Cancelled | GameResult::Ongoing => (0, 0),
                };

                let white_games_played = white.games_played + 1;
                let black_games_played = black.games_played + 1;
                let white_rating = white.rating + wd;
                let black_rating = black.rating + bd;
                User::apply_rating_result(
                    &state.db,
                    white.id,
                    white_rating,
                    white_games_played,
                    rating::next_k_factor(white.k_factor, white_games_played, white_rating),
                )
                .await?;
                User::apply_rating_result(
                    &state.db,
                    black.id,
                    black_rating,
                    black_games_played,
                    rating::next_k_factor(black.k_factor, black_games_played, black_rating),
                )
                .await?;
                (wd, bd)
            } else {
                (0, 0)
            };

            Ok(Some((game, white_delta, black_delta)))
        })
        .await?;

    let Some((game, white_delta, black_delta)) = finalized else {
        return Ok(());
    };

    for &color in &[Color::White, Color::Black] {
        let (delta, outcome) = match color {
            Color::White => (white_delta, outcome_label(result, Color::White)),
            Color::Black => (black_delta, outcome_label(result, Color::Black)),
        };
        state
            .router
            .emit(
                Target::User(game.user_id_of(color)),
                ServerEvent::GameEnded {
                    result: outcome,
                    reason: reason.clone(),
                    rating_delta: delta,
                },
            )
            .await;
    }
    state
        .router
        .emit(
            Target::GameRoom(game_id),
            ServerEvent::GameEnded {
                result: outcome_label(result, Color::White),
                reason: String::new(),
                rating_delta: 0,
            },
        )
        .await;

    Ok(())
}

fn outcome_label(result: GameResult, color: Color) -> String {
    match result {
        GameResult::Draw => "draw".to_string(),
        GameResult::Cancelled => "interrupted".to_string(),
        GameResult::WhiteWins => {
            if color == Color::White { "won".to_string() } else { "lost".to_string() }
        }
        GameResult::BlackWins => {
            if color == Color::Black { "won".to_string() } else { "lost".to_string() }
        }
        GameResult::Ongoing => "interrupted".to_string(),
    }
}
