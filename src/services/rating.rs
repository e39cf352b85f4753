//! Elo expected score and K-factor bookkeeping. Pure functions, no I/O —
//! the only two components in this repo with zero `async`.

#[derive(Debug, Clone, Copy)]
pub struct RatingDeltas {
    pub win: i32,
    pub draw: i32,
    pub lose: i32,
}

fn expected_score(rating: i32, opponent_rating: i32) -> f64 {
    let r = 10f64.powf(rating as f64 / 400.0);
    let r_opp = 10f64.powf(opponent_rating as f64 / 400.0);
    r / (r + r_opp)
}

/// Rounds toward +infinity, matching the spec's ceiling rule (draw/lose are
/// typically <= 0, so this rounds them *up*, i.e. toward zero).
fn ceil_delta(k: i32, term: f64) -> i32 {
    (k as f64 * term).ceil() as i32
}

pub fn deltas(rating: i32, opponent_rating: i32, k: i32) -> RatingDeltas {
    let e = expected_score(rating, opponent_rating);
    RatingDeltas {
        win: ceil_delta(k, 1.0 - e),
        draw: ceil_delta(k, 0.5 - e),
        lose: ceil_delta(k, -e),
    }
}

/// FIDE-style step-down, applied after the rating update lands. Never
/// increases.
pub fn next_k_factor(current_k: i32, games_played: i32, rating: i32) -> i32 {
    if current_k == 40 && games_played >= 30 {
        20
    } else if current_k == 20 && games_played >= 30 && rating >= 2400 {
        10
    } else {
        current_k
    }
}
