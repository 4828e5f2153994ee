//! Move value type.
//!
//! A `Move` names origin, destination, optional promotion kind and a small
//! flag mask describing the special rule it exercises. Moves are plain `Copy`
//! values; equality compares every field, so a forged move with wrong flags is
//! not equal to its generated counterpart.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};

pub type MoveFlags = u8;

pub const FLAG_CAPTURE: MoveFlags = 1 << 0;
pub const FLAG_EN_PASSANT: MoveFlags = 1 << 1;
pub const FLAG_CASTLE_KINGSIDE: MoveFlags = 1 << 2;
pub const FLAG_CASTLE_QUEENSIDE: MoveFlags = 1 << 3;
pub const FLAG_DOUBLE_PAWN_PUSH: MoveFlags = 1 << 4;

pub const FLAG_CASTLING: MoveFlags = FLAG_CASTLE_KINGSIDE | FLAG_CASTLE_QUEENSIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>, flags: MoveFlags) -> Self {
        Self {
            from,
            to,
            promotion,
            flags,
        }
    }

    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, None, 0)
    }

    #[inline]
    pub const fn has_flag(&self, flag: MoveFlags) -> bool {
        (self.flags & flag) != 0
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.has_flag(FLAG_CAPTURE)
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.has_flag(FLAG_EN_PASSANT)
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.has_flag(FLAG_CASTLING)
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.has_flag(FLAG_DOUBLE_PAWN_PUSH)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

/// Coordinate form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            let letter = kind.san_letter().unwrap_or('?').to_ascii_lowercase();
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}
