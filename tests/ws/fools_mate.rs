use crate::common::TestServer;

/// Scenario 1 (spec §8): fool's mate finalizes the game, emits the right
/// `game_ended` payload to each side, and updates both ratings.
#[tokio::test]
async fn fools_mate_finalizes_and_updates_ratings() {
    let server = TestServer::start().await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.make_move(game_id, "f3").await;
    white.recv_type("game_updated").await;
    black.recv_type("game_updated").await;
    let first_move_waiting = black.recv_type("first_move_waiting").await;
    assert_eq!(first_move_waiting["wait_time"], 15);

    black.make_move(game_id, "e5").await;
    black.recv_type("game_updated").await;
    white.recv_type("game_updated").await;

    white.make_move(game_id, "g4").await;
    white.recv_type("game_updated").await;
    black.recv_type("game_updated").await;

    black.make_move(game_id, "Qh4#").await;
    // Black is the mover and thus the winner.
    let black_ended = black.recv_type("game_ended").await;
    assert_eq!(black_ended["result"], "won");
    assert_eq!(black_ended["reason"], "Checkmate. Black won.");
    assert_eq!(black_ended["rating_delta"], 20);

    let white_ended = white.recv_type("game_ended").await;
    assert_eq!(white_ended["result"], "lost");
    assert_eq!(white_ended["rating_delta"], -20);

    let white_user = server.reload_user(server.white_id).await;
    let black_user = server.reload_user(server.black_id).await;
    assert_eq!(white_user.rating, 1180);
    assert_eq!(black_user.rating, 1220);
    assert_eq!(white_user.games_played, 1);
    assert_eq!(black_user.games_played, 1);
    assert!(white_user.current_game_id.is_none());
    assert!(black_user.current_game_id.is_none());

    let game = server.reload_game(game_id).await;
    assert_eq!(game.result, "0-1");
}
