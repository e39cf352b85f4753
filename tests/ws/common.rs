#![allow(dead_code)]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite;

/// A running server plus two registered users (white and black), grounded
/// on the teacher's `tests/ws/common.rs` harness shape, minus the cookie
/// jars: identity here is a bearer token, not a session cookie.
pub struct TestServer {
    pub addr: String,
    pub pool: PgPool,
    pub state: hydra_chess::AppState,
    pub white_id: i64,
    pub black_id: i64,
    white_token: String,
    black_token: String,
    // Keep the container alive for the lifetime of the test.
    _container: testcontainers::ContainerAsync<Postgres>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_timeouts(15, 60).await
    }

    /// Start with shortened first-move/disconnect timers so scenarios that
    /// depend on them don't have to run for real minutes.
    pub async fn start_with_timeouts(first_move_timeout_secs: i64, disconnect_timeout_secs: i64) -> Self {
        let container = Postgres::default().start().await.unwrap();
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();
        let database_url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

        let pool = sqlx::PgPool::connect(&database_url).await.unwrap();
        hydra_chess::db::run_migrations(&pool).await.unwrap();

        let (white_id, white_token) = Self::register(&pool, "test-white", 1200).await;
        let (black_id, black_token) = Self::register(&pool, "test-black", 1200).await;

        let (router, state) = hydra_chess::build_router_with_timeouts(
            pool.clone(),
            64,
            first_move_timeout_secs,
            disconnect_timeout_secs,
        )
        .await;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        TestServer {
            addr,
            pool,
            state,
            white_id,
            black_id,
            white_token,
            black_token,
            _container: container,
        }
    }

    async fn register(pool: &PgPool, login: &str, rating: i32) -> (i64, String) {
        let token = format!("{login}-api-token");
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (login, rating, api_token) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(login)
        .bind(rating)
        .bind(&token)
        .fetch_one(pool)
        .await
        .unwrap();
        (id, token)
    }

    /// Registers a third user at a given rating, returning (id, token).
    pub async fn register_extra(&self, login: &str, rating: i32) -> (i64, String) {
        Self::register(&self.pool, login, rating).await
    }

    /// Creates a `CREATED` game directly in storage (bypassing matchmaking),
    /// the way the teacher's harness hits storage/API directly to set up a
    /// fixture rather than always driving the full flow under test.
    pub async fn create_game(&self, total_clock_secs: i64) -> i64 {
        let game = hydra_chess::models::game::Game::create(
            &self.pool,
            self.white_id,
            self.black_id,
            1200,
            1200,
            total_clock_secs * 1_000_000,
        )
        .await
        .unwrap();
        hydra_chess::models::user::User::set_current_game(&self.pool, self.white_id, Some(game.id))
            .await
            .unwrap();
        hydra_chess::models::user::User::set_current_game(&self.pool, self.black_id, Some(game.id))
            .await
            .unwrap();
        game.id
    }

    /// Creates a game and runs it through `engine::start_game`, so the
    /// first-move timer is scheduled exactly as it would be after a real
    /// matchmaker pairing.
    pub async fn create_started_game(&self, total_clock_secs: i64) -> i64 {
        let game_id = self.create_game(total_clock_secs).await;
        hydra_chess::services::engine::start_game(&self.state, game_id)
            .await
            .unwrap();
        game_id
    }

    pub async fn reload_user(&self, user_id: i64) -> hydra_chess::models::user::User {
        hydra_chess::models::user::User::find_by_id(&self.pool, user_id).await.unwrap()
    }

    pub async fn reload_game(&self, game_id: i64) -> hydra_chess::models::game::Game {
        hydra_chess::models::game::Game::find_by_id(&self.pool, game_id).await.unwrap()
    }

    pub async fn ws_white(&self) -> WsClient {
        self.ws_connect(&self.white_token).await
    }

    pub async fn ws_black(&self) -> WsClient {
        self.ws_connect(&self.black_token).await
    }

    pub async fn ws_as(&self, token: &str) -> WsClient {
        self.ws_connect(token).await
    }

    async fn ws_connect(&self, token: &str) -> WsClient {
        let url = format!("ws://{}/ws", self.addr);
        let request = tungstenite::http::Request::builder()
            .uri(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Host", &self.addr)
            .header("Connection", "Upgrade")
            .header("Upgrade", "websocket")
            .header("Sec-WebSocket-Version", "13")
            .header(
                "Sec-WebSocket-Key",
                tungstenite::handshake::client::generate_key(),
            )
            .body(())
            .unwrap();

        let (stream, _response) = tokio_tungstenite::connect_async(request)
            .await
            .expect("WebSocket connect failed");

        let (sink, stream) = stream.split();
        WsClient { sink, stream }
    }
}

pub struct WsClient {
    sink: futures_util::stream::SplitSink<
        tokio_tungstenite::WebSocketStream<
            tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
        >,
        tungstenite::Message,
    >,
    stream: futures_util::stream::SplitStream<
        tokio_tungstenite::WebSocketStream<
            tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
        >,
    >,
}

impl WsClient {
    pub async fn send(&mut self, msg: Value) {
        self.sink
            .send(tungstenite::Message::Text(msg.to_string().into()))
            .await
            .expect("WS send failed");
    }

    pub async fn recv(&mut self) -> Value {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    pub async fn recv_timeout(&mut self, timeout: Duration) -> Value {
        let msg = tokio::time::timeout(timeout, self.stream.next())
            .await
            .expect("WS recv timed out")
            .expect("WS stream ended")
            .expect("WS recv error");

        match msg {
            tungstenite::Message::Text(text) => {
                serde_json::from_str(&text).expect("WS message not valid JSON")
            }
            other => panic!("Expected text WS message, got: {other:?}"),
        }
    }

    /// Skip messages until one has a matching `type` tag. Returns that message.
    pub async fn recv_type(&mut self, ty: &str) -> Value {
        self.recv_type_timeout(ty, Duration::from_secs(10)).await
    }

    pub async fn recv_type_timeout(&mut self, ty: &str, budget: Duration) -> Value {
        let deadline = tokio::time::Instant::now() + budget;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            let msg = self.recv_timeout(remaining).await;
            if msg.get("type").and_then(|k| k.as_str()) == Some(ty) {
                return msg;
            }
        }
    }

    pub async fn search_game(&mut self, time_control_seconds: i32) {
        self.send(json!({"type": "search_game", "time_control_seconds": time_control_seconds}))
            .await;
    }

    pub async fn cancel_search(&mut self) {
        self.send(json!({"type": "cancel_search"})).await;
    }

    pub async fn make_move(&mut self, game_id: i64, san: &str) {
        self.send(json!({"type": "make_move", "game_id": game_id, "san": san}))
            .await;
    }

    pub async fn resign(&mut self, game_id: i64) {
        self.send(json!({"type": "resign", "game_id": game_id})).await;
    }

    pub async fn make_draw_offer(&mut self, game_id: i64) {
        self.send(json!({"type": "make_draw_offer", "game_id": game_id}))
            .await;
    }

    pub async fn accept_draw_offer(&mut self, game_id: i64) {
        self.send(json!({"type": "accept_draw_offer", "game_id": game_id}))
            .await;
    }

    pub async fn decline_draw_offer(&mut self, game_id: i64) {
        self.send(json!({"type": "decline_draw_offer", "game_id": game_id}))
            .await;
    }

    pub async fn reconnect(&mut self, game_id: i64) {
        self.send(json!({"type": "connect", "request_type": "game", "game_id": game_id}))
            .await;
    }

    /// Closes the connection, simulating a dropped socket.
    pub async fn close(self) {
        let mut sink = self.sink;
        let _ = sink.close().await;
    }
}
