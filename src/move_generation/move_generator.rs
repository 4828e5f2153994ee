//! Pseudo-legal and legal move generation.
//!
//! Every piece of the side to move is visited from a1 to h8 and its moves are
//! produced by one exhaustive `match` on piece kind, so the movement rules are
//! all in one place. Legal moves are the pseudo-legal moves that survive
//! being applied to a clone without leaving the mover's king attacked.

use tracing::trace;

use crate::game_state::chess_rules::{castling_lanes, CastlingLane};
use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_apply::apply_unchecked;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
use crate::moves::chess_move::*;

/// Moves that obey piece movement shape but may leave the own king in check.
///
/// Castling is gated on rights and empty intervening squares only.
pub fn pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let side = board.side_to_move;
    let mut out = Vec::<Move>::with_capacity(64);

    for from in squares_of(board.occupancy(side)) {
        let Some(piece) = board.piece_at(from) else {
            continue;
        };

        match piece.kind {
            PieceKind::Pawn => push_pawn_moves(board, from, &mut out),
            PieceKind::Knight => push_targets(board, from, knight_attacks(from), &mut out),
            PieceKind::Bishop => {
                push_targets(board, from, bishop_attacks(from, board.occupied()), &mut out)
            }
            PieceKind::Rook => {
                push_targets(board, from, rook_attacks(from, board.occupied()), &mut out)
            }
            PieceKind::Queen => {
                push_targets(board, from, queen_attacks(from, board.occupied()), &mut out)
            }
            PieceKind::King => {
                push_targets(board, from, king_attacks(from), &mut out);
                push_castling_candidates(board, from, &mut out);
            }
        }
    }

    out
}

/// Pseudo-legal moves that do not leave the mover's king in check.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let side = board.side_to_move;
    let legal: Vec<Move> = pseudo_legal_moves(board)
        .into_iter()
        .filter(|mv| is_legal_candidate(board, mv, side))
        .collect();

    trace!(count = legal.len(), fen = %board.to_fen(), "generated legal moves");
    legal
}

/// True if at least one legal move exists; stops at the first one found.
pub fn has_legal_move(board: &Board) -> bool {
    let side = board.side_to_move;
    pseudo_legal_moves(board)
        .iter()
        .any(|mv| is_legal_candidate(board, mv, side))
}

fn is_legal_candidate(board: &Board, mv: &Move, side: Color) -> bool {
    if mv.is_castling() {
        // The king may not castle out of, or through, an attacked square.
        let enemy = side.opposite();
        let (kingside, queenside) = castling_lanes(side);
        let lane = if mv.has_flag(FLAG_CASTLE_KINGSIDE) {
            kingside
        } else {
            queenside
        };
        let crossed = Square::from_index_unchecked(lane.king_crosses);
        if is_square_attacked(board, mv.from, enemy) || is_square_attacked(board, crossed, enemy) {
            return false;
        }
    }

    let next = apply_unchecked(board, mv);
    !is_king_in_check(&next, side)
}

/// Emit a move to every target not occupied by a friendly piece.
fn push_targets(board: &Board, from: Square, targets: u64, out: &mut Vec<Move>) {
    let side = board.side_to_move;
    let enemy_occ = board.occupancy(side.opposite());

    for to in squares_of(targets & !board.occupancy(side)) {
        let flags = if enemy_occ & to.mask() != 0 {
            FLAG_CAPTURE
        } else {
            0
        };
        out.push(Move::new(from, to, None, flags));
    }
}

fn push_pawn_moves(board: &Board, from: Square, out: &mut Vec<Move>) {
    let side = board.side_to_move;
    let empty = !board.occupied();
    let enemy_occ = board.occupancy(side.opposite());
    let direction = side.pawn_direction();

    if let Some(one_step) = from.offset(0, direction) {
        if one_step.mask() & empty != 0 {
            push_pawn_move(side, from, one_step, 0, out);

            if from.rank() == side.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, direction) {
                    if two_step.mask() & empty != 0 {
                        out.push(Move::new(from, two_step, None, FLAG_DOUBLE_PAWN_PUSH));
                    }
                }
            }
        }
    }

    for to in squares_of(pawn_attacks(side, from)) {
        if to.mask() & enemy_occ != 0 {
            push_pawn_move(side, from, to, FLAG_CAPTURE, out);
        } else if board.en_passant_square == Some(to) && to.mask() & empty != 0 {
            out.push(Move::new(from, to, None, FLAG_CAPTURE | FLAG_EN_PASSANT));
        }
    }
}

/// Push a single-step pawn move, expanding it into all promotions on the last rank.
fn push_pawn_move(side: Color, from: Square, to: Square, flags: MoveFlags, out: &mut Vec<Move>) {
    if to.rank() == side.promotion_rank() {
        for kind in PROMOTION_KINDS {
            out.push(Move::new(from, to, Some(kind), flags));
        }
    } else {
        out.push(Move::new(from, to, None, flags));
    }
}

fn push_castling_candidates(board: &Board, king_from: Square, out: &mut Vec<Move>) {
    let side = board.side_to_move;
    let (kingside, queenside) = castling_lanes(side);

    for (lane, flag) in [
        (kingside, FLAG_CASTLE_KINGSIDE),
        (queenside, FLAG_CASTLE_QUEENSIDE),
    ] {
        if lane_is_open(board, side, king_from, &lane) {
            out.push(Move::new(
                king_from,
                Square::from_index_unchecked(lane.king_to),
                None,
                flag,
            ));
        }
    }
}

fn lane_is_open(board: &Board, side: Color, king_from: Square, lane: &CastlingLane) -> bool {
    board.castling_rights & lane.right != 0
        && king_from.index() == lane.king_from
        && board.piece_bitboard(side, PieceKind::Rook) & (1u64 << lane.rook_from) != 0
        && board.occupied() & lane.empty_mask == 0
}
