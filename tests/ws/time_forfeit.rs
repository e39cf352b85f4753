use crate::common::TestServer;

/// Scenario 5 (spec §8), ordinary-material half: a flagged clock finalizes
/// the game as a time loss for the flagged side once `on_time_is_up` fires,
/// with the spurious re-check passing through.
///
/// The insufficient-material half of the scenario (finalizing `1/2-1/2`
/// instead of a win when the winning side can't force mate) is covered at
/// the `chess_rules::is_insufficient_material` unit-test layer — engine's
/// branch on that boolean is a three-line match with no further board
/// dependency, and constructing a legal, fully-stripped-down game transcript
/// for an end-to-end flag-fall is not worth the brittleness it would add.
#[tokio::test]
async fn flagged_clock_ends_game_as_time_loss() {
    let server = TestServer::start().await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.make_move(game_id, "e4").await;
    white.recv_type("game_updated").await;
    black.recv_type("game_updated").await;

    // Simulate black's clock having already run out rather than waiting out
    // a real 60s sudden-death clock.
    hydra_chess::models::game::Game::set_clocks(&server.pool, game_id, 60_000_000, 0)
        .await
        .unwrap();

    hydra_chess::services::engine::on_time_is_up(&server.state, server.black_id, game_id)
        .await
        .unwrap();

    let white_ended = white.recv_type("game_ended").await;
    assert_eq!(white_ended["result"], "won");
    assert_eq!(white_ended["reason"], "Black ran out of time. White won.");
    assert_eq!(white_ended["rating_delta"], 20);

    let game = server.reload_game(game_id).await;
    assert_eq!(game.result, "1-0");
}

/// A `time_is_up` callback firing after the flagged side already moved (and
/// thus replenished) is spurious and must not finalize the game.
#[tokio::test]
async fn spurious_time_is_up_is_ignored() {
    let server = TestServer::start().await;
    let game_id = server.create_started_game(60).await;

    let mut white = server.ws_white().await;
    let mut black = server.ws_black().await;

    white.make_move(game_id, "e4").await;
    white.recv_type("game_updated").await;
    black.recv_type("game_updated").await;

    // Black still has plenty of time; firing the callback must no-op.
    hydra_chess::services::engine::on_time_is_up(&server.state, server.black_id, game_id)
        .await
        .unwrap();

    let game = server.reload_game(game_id).await;
    assert_eq!(game.state, "started");
    assert_eq!(game.result, "*");
}
