//! Canonical chess-rule constants.
//!
//! Starting position, castling geometry, and the draw thresholds used by the
//! game state machine.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without pawn move or capture before the fifty-move draw.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of one position that trigger the repetition draw.
pub const REPETITION_LIMIT: usize = 3;

/// Fixed squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub king_from: u8,
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
    /// Squares that must be empty between king and rook.
    pub empty_mask: u64,
    /// Square the king crosses on its way to `king_to`.
    pub king_crosses: u8,
}

pub const WHITE_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_WHITE_KINGSIDE,
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    empty_mask: (1u64 << 5) | (1u64 << 6),
    king_crosses: 5,
};

pub const WHITE_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_WHITE_QUEENSIDE,
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    empty_mask: (1u64 << 1) | (1u64 << 2) | (1u64 << 3),
    king_crosses: 3,
};

pub const BLACK_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_BLACK_KINGSIDE,
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    empty_mask: (1u64 << 61) | (1u64 << 62),
    king_crosses: 61,
};

pub const BLACK_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_BLACK_QUEENSIDE,
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    empty_mask: (1u64 << 57) | (1u64 << 58) | (1u64 << 59),
    king_crosses: 59,
};

/// Kingside and queenside lanes for a color.
#[inline]
pub const fn castling_lanes(color: Color) -> (CastlingLane, CastlingLane) {
    match color {
        Color::White => (WHITE_KINGSIDE, WHITE_QUEENSIDE),
        Color::Black => (BLACK_KINGSIDE, BLACK_QUEENSIDE),
    }
}

/// Castling right lost when a rook leaves or is captured on `square`.
#[inline]
pub const fn rook_home_right(square: u8) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

/// Both rights of a color, cleared when its king moves.
#[inline]
pub const fn king_rights(color: Color) -> CastlingRights {
    match color {
        Color::White => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        Color::Black => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
    }
}
