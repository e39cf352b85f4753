use std::time::Duration;

use crate::common::TestServer;

/// Two searchers within the rating-gap tolerance on the same time control
/// bucket are paired and redirected to the new game.
#[tokio::test]
async fn close_ratings_are_paired() {
    let server = TestServer::start().await;
    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.search_game(60).await;
    black.search_game(60).await;

    let white_redirect = white.recv_type("redirect").await;
    let black_redirect = black.recv_type("redirect").await;
    assert_eq!(white_redirect["url"], black_redirect["url"]);

    let white_user = server.reload_user(server.white_id).await;
    let black_user = server.reload_user(server.black_id).await;
    assert!(white_user.current_game_id.is_some());
    assert_eq!(white_user.current_game_id, black_user.current_game_id);
    assert!(!white_user.in_search);
    assert!(!black_user.in_search);
}

/// Scenario 6 (spec §8): a rating gap over the 200-point tolerance leaves
/// both searchers queued rather than pairing them.
#[tokio::test]
async fn wide_rating_gap_is_not_paired() {
    let server = TestServer::start().await;
    let (low_id, low_token) = server.register_extra("test-low", 1000).await;
    let (high_id, high_token) = server.register_extra("test-high", 1300).await;

    let mut low = server.ws_as(&low_token).await;
    let mut high = server.ws_as(&high_token).await;

    low.search_game(60).await;
    high.search_game(60).await;

    // Neither side should be paired; give the search workers a moment to
    // settle, then confirm both are still queued with no game assigned.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let low_user = server.reload_user(low_id).await;
    let high_user = server.reload_user(high_id).await;
    assert!(low_user.in_search);
    assert!(high_user.in_search);
    assert!(low_user.current_game_id.is_none());
    assert!(high_user.current_game_id.is_none());
}
