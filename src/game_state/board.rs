//! Board representation.
//!
//! `Board` stores one bitboard per (color, kind) pair plus the auxiliary state
//! a position needs: side to move, castling rights, en-passant target, clocks
//! and the Zobrist key used for repetition tracking. Every field is a plain
//! value, so `clone()` is a deep, independent copy that speculative legality
//! checks can mutate freely.

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::move_generation::legal_move_checks;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // [color][piece_kind]
    pub(crate) pieces: [[u64; 6]; 2],

    // Occupancy caches, kept in sync by `place_piece` / `remove_piece`.
    pub(crate) occupancy_by_color: [u64; 2],
    pub(crate) occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub(crate) zobrist_key: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
        }
    }
}

impl Board {
    /// Standard starting position.
    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.mask();
        if self.occupancy_all & mask == 0 {
            return None;
        }

        for color in [Color::White, Color::Black] {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in ALL_PIECE_KINDS {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }

        None
    }

    #[inline]
    pub fn piece_bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        legal_move_checks::king_square(self, color)
    }

    /// Every square holding a `by_color` piece that attacks `square`.
    ///
    /// Pins are ignored: a piece counts even if moving it would expose its
    /// own king.
    #[inline]
    pub fn attackers_of(&self, square: Square, by_color: Color) -> Vec<Square> {
        legal_move_checks::attackers_to_square(self, square, by_color)
            .into_iter()
            .map(|(sq, _)| sq)
            .collect()
    }

    #[inline]
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        legal_move_checks::is_square_attacked(self, square, by_color)
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        legal_move_checks::is_king_in_check(self, color)
    }

    /// Zobrist key of placement, side to move, rights and en-passant target.
    #[inline]
    pub fn position_key(&self) -> u64 {
        self.zobrist_key
    }

    pub(crate) fn place_piece(&mut self, piece: Piece, square: Square) {
        let mask = square.mask();
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    /// Clear `square`, returning whatever stood there.
    pub(crate) fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        let mask = !square.mask();
        self.pieces[piece.color.index()][piece.kind.index()] &= mask;
        self.occupancy_by_color[piece.color.index()] &= mask;
        self.occupancy_all &= mask;
        Some(piece)
    }

    #[inline]
    pub(crate) fn refresh_hash(&mut self) {
        self.zobrist_key = compute_zobrist_key(self);
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> crate::game_state::chess_types::Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn starting_position_layout() {
        let board = Board::new_game();

        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.occupied().count_ones(), 32);
        assert_eq!(
            board.piece_bitboard(Color::White, PieceKind::Rook),
            sq("a1").mask() | sq("h1").mask()
        );
    }

    #[test]
    fn clone_is_independent_of_original() {
        let original = Board::new_game();
        let mut copy = original.clone();

        copy.remove_piece(sq("e2"));
        copy.side_to_move = Color::Black;

        assert_eq!(
            original.piece_at(sq("e2")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(original.side_to_move, Color::White);
        assert_ne!(original, copy);
    }

    #[test]
    fn attackers_of_lists_every_attacker() {
        let board = Board::from_fen("4k3/8/8/3r4/8/2N5/4P3/4K2R w K - 0 1").expect("FEN should parse");

        let mut attackers = board.attackers_of(sq("d5"), Color::White);
        attackers.sort();
        assert_eq!(attackers, vec![sq("c3")]);

        let attackers = board.attackers_of(sq("f3"), Color::White);
        assert_eq!(attackers, vec![sq("e2")]);

        assert_eq!(board.attackers_of(sq("d1"), Color::Black), vec![sq("d5")]);
    }

    #[test]
    fn check_detection_uses_opponent_attacks() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4KR2 b - - 0 1").expect("FEN should parse");
        assert!(!board.is_in_check(Color::Black));

        let board = Board::from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1").expect("FEN should parse");
        assert!(board.is_in_check(Color::Black));
        assert!(!board.is_in_check(Color::White));
    }
}
