//! Zobrist hashing for position identity and repetition tracking.
//!
//! The key tables are drawn once from a fixed-seed `StdRng`, so keys are
//! deterministic across runs and games.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::{board::Board, chess_types::*};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.next_u64();
            }
        }
    }

    let side_to_move = rng.next_u64();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.next_u64();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.next_u64();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Compute the full position key from placement, side, rights and en-passant target.
pub fn compute_zobrist_key(board: &Board) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for color in [Color::White, Color::Black] {
        for kind in ALL_PIECE_KINDS {
            for sq in squares_of(board.piece_bitboard(color, kind)) {
                key ^= tables.piece_square[color.index()][kind.index()][sq.index() as usize];
            }
        }
    }

    if board.side_to_move == Color::Black {
        key ^= tables.side_to_move;
    }

    key ^= tables.castling[(board.castling_rights & 0x0F) as usize];

    if let Some(ep_square) = board.en_passant_square {
        key ^= tables.en_passant_file[ep_square.file() as usize];
    }

    key
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::board::Board;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = Board::new_game();
        let b = Board::new_game();
        assert_eq!(a.position_key(), b.position_key());
        assert_eq!(a.position_key(), compute_zobrist_key(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.position_key(), b.position_key());
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.position_key(), without_rights.position_key());
    }

    #[test]
    fn en_passant_target_changes_hash() {
        let no_ep =
            Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let ep = Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_ne!(no_ep.position_key(), ep.position_key());
    }

    #[test]
    fn clocks_do_not_change_hash() {
        let early = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let late = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 37 80").expect("FEN should parse");
        assert_eq!(early.position_key(), late.position_key());
    }
}
