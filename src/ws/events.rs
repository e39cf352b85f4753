//! Tagged sum types for inbound/outbound WS traffic (Design Note §9:
//! "duck-typed payloads → tagged event variants"). The gateway validates
//! once against these shapes before dispatch.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    SearchGame {
        time_control_seconds: Option<i32>,
        game_id: Option<i64>,
    },
    CancelSearch {},
    MakeMove { game_id: i64, san: String },
    Resign { game_id: i64 },
    MakeDrawOffer { game_id: i64 },
    AcceptDrawOffer { game_id: i64 },
    DeclineDrawOffer { game_id: i64 },
    Connect { request_type: String, game_id: Option<i64> },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    GameStarted {
        game_id: i64,
        moves: Vec<String>,
        color: String,
        opp_nickname: String,
        opp_rating: i32,
        own_clock: i64,
        opp_clock: i64,
        rating_win: i32,
        rating_draw: i32,
        rating_lose: i32,
        can_send_draw_offer: bool,
        is_player: bool,
    },
    GameUpdated {
        san: String,
        own_clock: i64,
        opp_clock: i64,
    },
    FirstMoveWaiting {
        wait_time: i64,
    },
    OppDisconnected {
        wait_time: i64,
    },
    OppReconnected,
    DrawOffer,
    DrawOfferDeclined,
    GameEnded {
        result: String,
        reason: String,
        rating_delta: i32,
    },
    Redirect {
        url: String,
    },
    SetData {
        nickname: String,
        rating: i32,
    },
    LoggedTwice,
}
