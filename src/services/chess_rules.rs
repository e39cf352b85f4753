//! Thin wrapper over `shakmaty`, the external chess-rules collaborator.
//! This module is the only place in the repo that imports `shakmaty` types
//! directly — everything else talks in SAN strings and `TerminalResult`s.

use std::collections::HashMap;

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, Color as ShakmatyColor, EnPassantMode, Position};

use crate::models::game::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalResult {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl TerminalResult {
    pub fn reason(&self) -> String {
        match self {
            TerminalResult::Checkmate { winner } => format!(
                "Checkmate. {} won.",
                match winner {
                    Color::White => "White",
                    Color::Black => "Black",
                }
            ),
            TerminalResult::Stalemate => "Stalemate. Draw.".to_string(),
            TerminalResult::InsufficientMaterial => "Insufficient material. Draw.".to_string(),
            TerminalResult::FiftyMoveRule => "Fifty-move rule. Draw.".to_string(),
            TerminalResult::ThreefoldRepetition => "Threefold repetition. Draw.".to_string(),
        }
    }
}

fn from_shakmaty_color(color: ShakmatyColor) -> Color {
    match color {
        ShakmatyColor::White => Color::White,
        ShakmatyColor::Black => Color::Black,
    }
}

/// Replays a stored comma-split SAN move list from the starting position.
/// Malformed history indicates store corruption, not client input, so this
/// returns `Err` rather than dropping silently.
pub fn replay(moves: &[&str]) -> Result<Chess, String> {
    let mut pos = Chess::default();
    for san_str in moves {
        let san: San = san_str
            .parse()
            .map_err(|e| format!("corrupt move history at {san_str:?}: {e}"))?;
        let mv = san
            .to_move(&pos)
            .map_err(|e| format!("illegal move in stored history {san_str:?}: {e}"))?;
        pos = pos
            .play(&mv)
            .map_err(|e| format!("play failed replaying {san_str:?}: {e}"))?;
    }
    Ok(pos)
}

/// Parses and applies one SAN move. `None` means the spec's "drop silently"
/// path: unparseable or illegal input.
pub fn apply_san(pos: &Chess, san_str: &str) -> Option<Chess> {
    let san: San = san_str.parse().ok()?;
    let mv = san.to_move(pos).ok()?;
    pos.clone().play(&mv).ok()
}

pub fn zobrist_hash(pos: &Chess) -> u64 {
    pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}

pub fn fen(pos: &Chess) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// Checks the four library-detectable terminal conditions plus threefold
/// repetition, which this engine tracks itself via `repetition_counts`
/// (shakmaty's `Position` carries no move history).
pub fn terminal_result(pos: &Chess, repetition_counts: &HashMap<u64, u8>) -> Option<TerminalResult> {
    if pos.is_checkmate() {
        let winner = from_shakmaty_color(!pos.turn());
        return Some(TerminalResult::Checkmate { winner });
    }
    if pos.is_stalemate() {
        return Some(TerminalResult::Stalemate);
    }
    if pos.is_insufficient_material() {
        return Some(TerminalResult::InsufficientMaterial);
    }
    if pos.halfmoves() >= 100 {
        return Some(TerminalResult::FiftyMoveRule);
    }
    let hash = zobrist_hash(pos);
    if repetition_counts.get(&hash).copied().unwrap_or(0) >= 3 {
        return Some(TerminalResult::ThreefoldRepetition);
    }
    None
}

pub fn is_insufficient_material(pos: &Chess) -> bool {
    pos.is_insufficient_material()
}

pub fn whose_turn(pos: &Chess) -> Color {
    from_shakmaty_color(pos.turn())
}
