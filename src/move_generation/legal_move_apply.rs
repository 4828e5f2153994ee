//! Move application and undo.
//!
//! `apply` re-validates the move against the legal set before building the
//! next board, so stale or hand-built `Move` values cannot corrupt a game.
//! The input board is never touched: the next position is produced on a
//! clone and returned only once it is complete.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_lanes, king_rights, rook_home_right};
use crate::game_state::game_record::GameRecord;
use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::move_generator::legal_moves;
use crate::moves::chess_move::*;

/// Apply `mv` to `board`, returning the next position.
///
/// Fails with `InvalidPromotion` when a legal move with the same squares exists
/// but the promotion kind is missing or extraneous, and with `IllegalMove`
/// for anything else outside the legal set.
pub fn apply(board: &Board, mv: &Move) -> ChessResult<Board> {
    let legal = legal_moves(board);

    if legal.contains(mv) {
        return Ok(apply_unchecked(board, mv));
    }

    let same_squares: Vec<&Move> = legal
        .iter()
        .filter(|candidate| candidate.from == mv.from && candidate.to == mv.to)
        .collect();

    if let Some(first) = same_squares.first() {
        if first.is_promotion() && mv.promotion.is_none() {
            return Err(ChessError::InvalidPromotion(format!(
                "{mv} must name a promotion piece"
            )));
        }
        if !first.is_promotion() && mv.promotion.is_some() {
            return Err(ChessError::InvalidPromotion(format!(
                "{mv} does not reach the last rank with a pawn"
            )));
        }
        if mv.promotion == Some(PieceKind::King) || mv.promotion == Some(PieceKind::Pawn) {
            return Err(ChessError::InvalidPromotion(format!(
                "{mv} names a piece a pawn cannot become"
            )));
        }
    }

    Err(ChessError::IllegalMove(format!(
        "{mv} is not legal in {}",
        board.to_fen()
    )))
}

/// Pop the last record entry and return the board as it was before that move.
pub fn undo(record: &mut GameRecord) -> ChessResult<Board> {
    record
        .pop()
        .map(|entry| entry.board_before)
        .ok_or(ChessError::NoMoveToUndo)
}

/// Build the next board without checking legality.
///
/// Callers must pass a pseudo-legal move for `board`.
pub(crate) fn apply_unchecked(board: &Board, mv: &Move) -> Board {
    let moving_color = board.side_to_move;
    let mut next = board.clone();

    let Some(moved) = next.remove_piece(mv.from) else {
        return next;
    };

    let captured = if mv.is_en_passant() {
        // The captured pawn stands beside the origin, behind the target square.
        mv.to
            .offset(0, -moving_color.pawn_direction())
            .and_then(|capture_sq| next.remove_piece(capture_sq))
    } else {
        next.remove_piece(mv.to)
    };

    let landing = mv
        .promotion
        .map_or(moved, |kind| Piece::new(moving_color, kind));
    next.place_piece(landing, mv.to);

    if mv.is_castling() {
        let (kingside, queenside) = castling_lanes(moving_color);
        let lane = if mv.has_flag(FLAG_CASTLE_KINGSIDE) {
            kingside
        } else {
            queenside
        };
        if let Some(rook) = next.remove_piece(Square::from_index_unchecked(lane.rook_from)) {
            next.place_piece(rook, Square::from_index_unchecked(lane.rook_to));
        }
    }

    if moved.kind == PieceKind::King {
        next.castling_rights &= !king_rights(moving_color);
    }
    next.castling_rights &= !rook_home_right(mv.from.index());
    next.castling_rights &= !rook_home_right(mv.to.index());

    next.en_passant_square = if mv.is_double_pawn_push() {
        mv.from.offset(0, moving_color.pawn_direction())
    } else {
        None
    };

    if moved.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = moving_color.opposite();
    next.refresh_hash();

    next
}
