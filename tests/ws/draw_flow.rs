use crate::common::TestServer;

/// Scenario 4 (spec §8): an offer followed by a second offer from the other
/// side is treated as acceptance and finalizes the game as a draw.
#[tokio::test]
async fn second_draw_offer_is_treated_as_acceptance() {
    let server = TestServer::start().await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.make_move(game_id, "e4").await;
    white.recv_type("game_updated").await;
    black.recv_type("game_updated").await;

    white.make_draw_offer(game_id).await;
    black.recv_type("draw_offer").await;

    black.make_draw_offer(game_id).await;

    let white_ended = white.recv_type("game_ended").await;
    assert_eq!(white_ended["result"], "draw");
    assert_eq!(white_ended["reason"], "Draw.");
    assert_eq!(white_ended["rating_delta"], 0);
    let black_ended = black.recv_type("game_ended").await;
    assert_eq!(black_ended["result"], "draw");
    assert_eq!(black_ended["rating_delta"], 0);

    let white_user = server.reload_user(server.white_id).await;
    let black_user = server.reload_user(server.black_id).await;
    assert_eq!(white_user.rating, 1200);
    assert_eq!(black_user.rating, 1200);
    assert_eq!(white_user.games_played, 1);

    let game = server.reload_game(game_id).await;
    assert_eq!(game.result, "1/2-1/2");
}

/// A single offer followed by an explicit decline clears the offer and
/// notifies the sender, without ending the game.
#[tokio::test]
async fn draw_offer_can_be_declined() {
    let server = TestServer::start().await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.make_move(game_id, "e4").await;
    white.recv_type("game_updated").await;
    black.recv_type("game_updated").await;

    white.make_draw_offer(game_id).await;
    black.recv_type("draw_offer").await;

    black.decline_draw_offer(game_id).await;
    white.recv_type("draw_offer_declined").await;

    let game = server.reload_game(game_id).await;
    assert_eq!(game.state, "started");
    assert!(game.draw_offer_sender.is_none());
}
