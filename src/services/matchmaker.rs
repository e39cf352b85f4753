//! Rating-bounded pairing over fixed time-control buckets. Generalizes the
//! teacher's `game_creator::create_game` (a bare "insert a Game row" helper)
//! into the full search/accept/park flow.

use std::time::Duration;

use crate::AppState;
use crate::error::AppError;
use crate::models::game::Game;
use crate::models::game_request::GameRequest;
use crate::models::user::User;
use crate::services::engine;

pub const ALLOWED_TIME_CONTROLS_SECONDS: &[i32] = &[60, 120, 180, 300, 600, 1200, 1800, 3600];
pub const RATING_GAP_TOLERANCE: i32 = 200;
const LOCK_WAIT: Duration = Duration::from_secs(10);
const LOCK_HOLD: Duration = Duration::from_secs(5);

pub fn is_allowed_time_control(seconds: i32) -> bool {
    ALLOWED_TIME_CONTROLS_SECONDS.contains(&seconds)
}

pub async fn search(state: &AppState, user_id: i64, time_control_seconds: i32) -> Result<(), AppError> {
    if !is_allowed_time_control(time_control_seconds) {
        return Ok(());
    }

    state
        .store
        .with_lock("user", user_id, LOCK_WAIT, LOCK_HOLD, || async {
            let user = User::find_by_id(&state.db, user_id).await?;
            if user.current_game_id.is_some() || user.in_search {
                return Ok(());
            }

            let candidates = GameRequest::find_by_time_control(&state.db, time_control_seconds).await?;
            let mut ranked = Vec::with_capacity(candidates.len());
            for req in candidates {
                let opponent = User::find_by_id(&state.db, req.user_id).await?;
                let gap = (opponent.rating - user.rating).abs();
                ranked.push((gap, req, opponent));
            }
            ranked.sort_by_key(|(gap, req, _)| (*gap, req.id));

            if let Some((gap, _req, opponent)) = ranked.into_iter().next() {
                if gap <= RATING_GAP_TOLERANCE {
                    return pair(state, &user, &opponent, time_control_seconds).await;
                }
            }

            GameRequest::create(&state.db, user_id, time_control_seconds).await?;
            User::set_in_search(&state.db, user_id, true).await?;
            Ok(())
        })
        .await
}

async fn pair(
    state: &AppState,
    searcher: &User,
    opponent: &User,
    time_control_seconds: i32,
) -> Result<(), AppError> {
    GameRequest::delete_by_user(&state.db, opponent.id).await?;

    let total_clock_micros = (time_control_seconds as i64) * 1_000_000;
    let game = Game::create(
        &state.db,
        searcher.id,
        opponent.id,
        searcher.rating,
        opponent.rating,
        total_clock_micros,
    )
    .await?;

    User::set_current_game(&state.db, searcher.id, Some(game.id)).await?;
    User::set_current_game(&state.db, opponent.id, Some(game.id)).await?;

    state
        .router
        .emit(
            crate::services::session_router::Target::User(searcher.id),
            crate::ws::events::ServerEvent::Redirect {
                url: format!("/games/{}", game.id),
            },
        )
        .await;
    state
        .router
        .emit(
            crate::services::session_router::Target::User(opponent.id),
            crate::ws::events::ServerEvent::Redirect {
                url: format!("/games/{}", game.id),
            },
        )
        .await;

    engine::enqueue_start_game(state, game.id).await;
    Ok(())
}

pub async fn cancel_search(state: &AppState, user_id: i64) -> Result<(), AppError> {
    state
        .store
        .with_lock("user", user_id, LOCK_WAIT, LOCK_HOLD, || async {
            let user = User::find_by_id(&state.db, user_id).await?;
            if user.in_search {
                User::set_in_search(&state.db, user_id, false).await?;
                GameRequest::delete_by_user(&state.db, user_id).await?;
            }
            Ok(())
        })
        .await
}
