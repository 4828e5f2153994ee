//! Attack and check queries.
//!
//! All functions read the board only. Pins are ignored here; legality is
//! decided later by applying a move to a clone and re-testing check.

use crate::game_state::{board::Board, chess_types::*};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    let kings = board.piece_bitboard(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(Square::from_lowest_bit(kings))
    }
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Bitboard of `attacker_color` pieces attacking `square`.
///
/// Attacks are symmetric for every piece but pawns, so each lookup starts from
/// the target square and intersects with the attacker's pieces.
pub fn attackers_mask(board: &Board, square: Square, attacker_color: Color) -> u64 {
    let occupancy = board.occupied();
    let of = |kind| board.piece_bitboard(attacker_color, kind);

    let pawns = pawn_attacks(attacker_color.opposite(), square) & of(PieceKind::Pawn);
    let knights = knight_attacks(square) & of(PieceKind::Knight);
    let kings = king_attacks(square) & of(PieceKind::King);
    let diagonal = bishop_attacks(square, occupancy) & (of(PieceKind::Bishop) | of(PieceKind::Queen));
    let orthogonal = rook_attacks(square, occupancy) & (of(PieceKind::Rook) | of(PieceKind::Queen));

    pawns | knights | kings | diagonal | orthogonal
}

#[inline]
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    attackers_mask(board, square, attacker_color) != 0
}

/// Attacking squares with the kind of piece on each, lowest square first.
pub fn attackers_to_square(
    board: &Board,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    squares_of(attackers_mask(board, square, attacker_color))
        .filter_map(|sq| board.piece_at(sq).map(|piece| (sq, piece.kind)))
        .collect()
}
