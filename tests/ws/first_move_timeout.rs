use crate::common::TestServer;

/// Scenario 2 (spec §8): neither side moves before the first-move timeout;
/// the engine cancels the game without touching ratings.
#[tokio::test]
async fn first_move_timeout_cancels_game() {
    let server = TestServer::start_with_timeouts(1, 60).await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    let ended = white.recv_type_timeout("game_ended", std::time::Duration::from_secs(5)).await;
    assert_eq!(ended["result"], "interrupted");
    assert_eq!(ended["rating_delta"], 0);
    black.recv_type_timeout("game_ended", std::time::Duration::from_secs(5)).await;

    let white_user = server.reload_user(server.white_id).await;
    let black_user = server.reload_user(server.black_id).await;
    assert_eq!(white_user.games_played, 0);
    assert_eq!(black_user.games_played, 0);
    assert!(white_user.current_game_id.is_none());
    assert!(black_user.current_game_id.is_none());

    let game = server.reload_game(game_id).await;
    assert_eq!(game.result, "-");
    assert_eq!(game.state, "finished");
}
