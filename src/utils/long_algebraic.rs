//! Coordinate notation (`e2e4`, `e7e8q`).
//!
//! The terminal accepts this alongside SAN. Text is resolved against the
//! legal set, so the returned move carries the generator's flags.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn format_long_algebraic(mv: &Move) -> String {
    mv.to_string()
}

/// True if `text` has the shape of a coordinate move, legal or not.
pub fn looks_like_long_algebraic(text: &str) -> bool {
    split_long_algebraic(text.trim()).is_ok()
}

pub fn parse_long_algebraic(text: &str, board: &Board) -> ChessResult<Move> {
    let (from, to, promotion) = split_long_algebraic(text.trim())?;

    let mut same_squares = legal_moves(board)
        .into_iter()
        .filter(|mv| mv.from == from && mv.to == to)
        .peekable();

    let Some(first) = same_squares.peek().copied() else {
        return Err(ChessError::IllegalMove(format!(
            "{} is not legal in {}",
            text.trim(),
            board.to_fen()
        )));
    };

    if let Some(found) = same_squares.find(|mv| mv.promotion == promotion) {
        return Ok(found);
    }

    if first.is_promotion() {
        Err(ChessError::InvalidPromotion(format!(
            "{} must name a promotion piece",
            text.trim()
        )))
    } else {
        Err(ChessError::InvalidPromotion(format!(
            "{} does not promote",
            text.trim()
        )))
    }
}

fn split_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let unknown = || ChessError::UnknownNotation(text.to_owned());

    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(unknown());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| unknown())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| unknown())?;

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(match ch.to_ascii_lowercase() {
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            _ => return Err(unknown()),
        }),
    };

    Ok((from, to, promotion))
}
