use crate::common::TestServer;
use hydra_chess::models::game::GameResult;
use hydra_chess::services::engine;

/// `end_game` applied twice (e.g. a stray timer firing after resignation
/// already finalized the game) must be a no-op the second time: no double
/// rating update, no re-emitted result.
#[tokio::test]
async fn end_game_is_idempotent() {
    let server = TestServer::start().await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.make_move(game_id, "e4").await;
    white.recv_type("game_updated").await;
    black.recv_type("game_updated").await;

    engine::end_game(&server.state, game_id, GameResult::WhiteWins, "Black resigned.".to_string(), true)
        .await
        .unwrap();
    white.recv_type("game_ended").await;
    black.recv_type("game_ended").await;

    let white_after_first = server.reload_user(server.white_id).await;

    // A second finalize (e.g. a disconnect timer that fired just after the
    // resignation already closed the game) must change nothing further.
    engine::end_game(&server.state, game_id, GameResult::BlackWins, "Stray timer.".to_string(), true)
        .await
        .unwrap();

    let white_after_second = server.reload_user(server.white_id).await;
    assert_eq!(white_after_first.rating, white_after_second.rating);
    assert_eq!(white_after_first.games_played, white_after_second.games_played);

    let game = server.reload_game(game_id).await;
    assert_eq!(game.result, "1-0");
}

/// A resignation before any move has been made is treated as a cancellation
/// (not a loss), matching the spec's "no move yet" edge case.
#[tokio::test]
async fn resign_before_first_move_cancels_rather_than_loses() {
    let server = TestServer::start().await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.resign(game_id).await;
    let ended = white.recv_type("game_ended").await;
    assert_eq!(ended["result"], "interrupted");
    black.recv_type("game_ended").await;

    let game = server.reload_game(game_id).await;
    assert_eq!(game.result, "-");

    let white_user = server.reload_user(server.white_id).await;
    assert_eq!(white_user.games_played, 0);
}
