use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::db::DbPool;
use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Created,
    Started,
    Finished,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Created => "created",
            GameState::Started => "started",
            GameState::Finished => "finished",
        }
    }
}

impl std::str::FromStr for GameState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(GameState::Created),
            "started" => Ok(GameState::Started),
            "finished" => Ok(GameState::Finished),
            other => Err(format!("unknown game state: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
    Cancelled,
}

impl GameResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::Ongoing => "*",
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Cancelled => "-",
        }
    }

    pub fn from_winner(winner: Color) -> GameResult {
        match winner {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

impl std::str::FromStr for GameResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*" => Ok(GameResult::Ongoing),
            "1-0" => Ok(GameResult::WhiteWins),
            "0-1" => Ok(GameResult::BlackWins),
            "1/2-1/2" => Ok(GameResult::Draw),
            "-" => Ok(GameResult::Cancelled),
            other => Err(format!("unknown game result: {other}")),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)] // Fields populated by SELECT * via sqlx
pub struct Game {
    pub id: i64,
    pub white_user_id: i64,
    pub black_user_id: i64,
    pub white_rating: i32,
    pub black_rating: i32,
    pub state: String,
    pub result: String,
    pub moves: String,
    pub total_clock_micros: i64,
    pub white_clock_micros: i64,
    pub black_clock_micros: i64,
    pub last_move_time: Option<DateTime<Utc>>,
    pub draw_offer_sender: Option<i64>,
    pub first_move_timeout_id: Option<String>,
    pub first_move_timeout_eta: Option<DateTime<Utc>>,
    pub white_time_is_up_id: Option<String>,
    pub white_time_is_up_eta: Option<DateTime<Utc>>,
    pub black_time_is_up_id: Option<String>,
    pub black_time_is_up_eta: Option<DateTime<Utc>>,
    pub white_disconnect_timeout_id: Option<String>,
    pub white_disconnect_timeout_eta: Option<DateTime<Utc>>,
    pub black_disconnect_timeout_id: Option<String>,
    pub black_disconnect_timeout_eta: Option<DateTime<Utc>>,
    pub repetition_counts: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Game with eagerly loaded player associations.
#[derive(Debug, Clone)]
pub struct GameWithPlayers {
    pub game: Game,
    pub white: User,
    pub black: User,
}

impl GameWithPlayers {
    pub fn has_player(&self, user_id: i64) -> bool {
        self.white.id == user_id || self.black.id == user_id
    }

    pub fn color_of(&self, user_id: i64) -> Option<Color> {
        if self.white.id == user_id {
            Some(Color::White)
        } else if self.black.id == user_id {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, user_id: i64) -> Option<&User> {
        if self.white.id == user_id {
            Some(&self.black)
        } else if self.black.id == user_id {
            Some(&self.white)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Game {
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Game, sqlx::Error> {
        sqlx::query_as::<_, Game>("SELECT * FROM games WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_with_players(
        pool: &DbPool,
        id: i64,
    ) -> Result<GameWithPlayers, sqlx::Error> {
        let game = Self::find_by_id(pool, id).await?;
        let white = User::find_by_id(pool, game.white_user_id).await?;
        let black = User::find_by_id(pool, game.black_user_id).await?;
        Ok(GameWithPlayers { game, white, black })
    }

    pub async fn create(
        pool: &DbPool,
        white_user_id: i64,
        black_user_id: i64,
        white_rating: i32,
        black_rating: i32,
        total_clock_micros: i64,
    ) -> Result<Game, sqlx::Error> {
        sqlx::query_as::<_, Game>(
            "INSERT INTO games
                (white_user_id, black_user_id, white_rating, black_rating,
                 total_clock_micros, white_clock_micros, black_clock_micros)
             VALUES ($1, $2, $3, $4, $5, $5, $5)
             RETURNING *",
        )
        .bind(white_user_id)
        .bind(black_user_id)
        .bind(white_rating)
        .bind(black_rating)
        .bind(total_clock_micros)
        .fetch_one(pool)
        .await
    }

    pub async fn set_state(pool: &DbPool, game_id: i64, state: GameState) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE games SET state = $1, updated_at = NOW() WHERE id = $2")
            .bind(state.as_str())
            .bind(game_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn append_move(
        pool: &DbPool,
        game_id: i64,
        san: &str,
        white_clock_micros: i64,
        black_clock_micros: i64,
        last_move_time: DateTime<Utc>,
        repetition_counts: &serde_json::Value,
    ) -> Result<Game, sqlx::Error> {
        sqlx::query_as::<_, Game>(
            "UPDATE games SET
                moves = CASE WHEN moves = '' THEN $1 ELSE moves || ',' || $1 END,
                white_clock_micros = $2,
                black_clock_micros = $3,
                last_move_time = $4,
                draw_offer_sender = NULL,
                repetition_counts = $5,
                updated_at = NOW()
             WHERE id = $6
             RETURNING *",
        )
        .bind(san)
        .bind(white_clock_micros)
        .bind(black_clock_micros)
        .bind(last_move_time)
        .bind(repetition_counts)
        .bind(game_id)
        .fetch_one(pool)
        .await
    }

    pub async fn set_clocks(
        pool: &DbPool,
        game_id: i64,
        white_clock_micros: i64,
        black_clock_micros: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE games SET white_clock_micros = $1, black_clock_micros = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(white_clock_micros)
        .bind(black_clock_micros)
        .bind(game_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn set_draw_offer_sender(
        pool: &DbPool,
        game_id: i64,
        user_id: Option<i64>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE games SET draw_offer_sender = $1, updated_at = NOW() WHERE id = $2")
            .bind(user_id)
            .bind(game_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn set_finished(
        pool: &DbPool,
        game_id: i64,
        result: GameResult,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE games SET state = 'finished', result = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(result.as_str())
        .bind(game_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn set_first_move_timeout(
        pool: &DbPool,
        game_id: i64,
        handle: Option<&str>,
        eta: Option<DateTime<Utc>>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE games SET first_move_timeout_id = $1, first_move_timeout_eta = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(handle)
        .bind(eta)
        .bind(game_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn set_time_is_up_timer(
        pool: &DbPool,
        game_id: i64,
        color: Color,
        handle: Option<&str>,
        eta: Option<DateTime<Utc>>,
    ) -> Result<(), sqlx::Error> {
        let query = match color {
            Color::White => {
                "UPDATE games SET white_time_is_up_id = $1, white_time_is_up_eta = $2, updated_at = NOW() WHERE id = $3"
            }
            Color::Black => {
                "UPDATE games SET black_time_is_up_id = $1, black_time_is_up_eta = $2, updated_at = NOW() WHERE id = $3"
            }
        };
        sqlx::query(query)
            .bind(handle)
            .bind(eta)
            .bind(game_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn set_disconnect_timeout(
        pool: &DbPool,
        game_id: i64,
        color: Color,
        handle: Option<&str>,
        eta: Option<DateTime<Utc>>,
    ) -> Result<(), sqlx::Error> {
        let query = match color {
            Color::White => {
                "UPDATE games SET white_disconnect_timeout_id = $1, white_disconnect_timeout_eta = $2, updated_at = NOW() WHERE id = $3"
            }
            Color::Black => {
                "UPDATE games SET black_disconnect_timeout_id = $1, black_disconnect_timeout_eta = $2, updated_at = NOW() WHERE id = $3"
            }
        };
        sqlx::query(query)
            .bind(handle)
            .bind(eta)
            .bind(game_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

impl Game {
    pub fn state(&self) -> GameState {
        self.state.parse().expect("state column holds a valid GameState")
    }

    pub fn result(&self) -> GameResult {
        self.result.parse().expect("result column holds a valid GameResult")
    }

    pub fn moves(&self) -> Vec<&str> {
        if self.moves.is_empty() {
            Vec::new()
        } else {
            self.moves.split(',').collect()
        }
    }

    pub fn clock_micros(&self, color: Color) -> i64 {
        match color {
            Color::White => self.white_clock_micros,
            Color::Black => self.black_clock_micros,
        }
    }

    pub fn rating_of(&self, color: Color) -> i32 {
        match color {
            Color::White => self.white_rating,
            Color::Black => self.black_rating,
        }
    }

    pub fn user_id_of(&self, color: Color) -> i64 {
        match color {
            Color::White => self.white_user_id,
            Color::Black => self.black_user_id,
        }
    }

    /// Whose move it is, derived from the parity of the move list.
    pub fn side_to_move(&self) -> Color {
        if self.moves().len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}
