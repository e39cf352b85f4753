use std::time::Duration;

use crate::common::TestServer;

/// Scenario 3 (spec §8): a disconnect after at least one move starts the
/// opponent's wait, and an unanswered disconnect finalizes the game in the
/// opponent's favor with ratings updated.
#[tokio::test]
async fn disconnect_timeout_awards_opponent() {
    let server = TestServer::start_with_timeouts(15, 1).await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.make_move(game_id, "e4").await;
    white.recv_type("game_updated").await;
    black.recv_type("game_updated").await;

    white.close().await;

    let disconnected = black.recv_type("opp_disconnected").await;
    assert_eq!(disconnected["wait_time"], 1);

    let ended = black.recv_type_timeout("game_ended", Duration::from_secs(5)).await;
    assert_eq!(ended["result"], "won");
    assert_eq!(ended["reason"], "White player disconnected. Black won.");
    assert_eq!(ended["rating_delta"], 20);

    let white_user = server.reload_user(server.white_id).await;
    let black_user = server.reload_user(server.black_id).await;
    assert_eq!(white_user.rating, 1180);
    assert_eq!(black_user.rating, 1220);

    let game = server.reload_game(game_id).await;
    assert_eq!(game.result, "0-1");
}
