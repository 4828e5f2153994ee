//! Perft: exhaustive legal-move tree counts.
//!
//! Leaf statistics follow the usual perft tables (captures, en passant,
//! castles, promotions, checks, checkmates) so generator bugs show up as a
//! mismatch in a specific column rather than only in the node total.

use crate::game_state::board::Board;
use crate::move_generation::legal_move_apply::apply_unchecked;
use crate::move_generation::move_generator::{has_legal_move, legal_moves};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, mv: &Move, after: &Board) {
        self.nodes += 1;

        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.is_en_passant() {
            self.en_passant += 1;
        }
        if mv.is_castling() {
            self.castles += 1;
        }
        if mv.is_promotion() {
            self.promotions += 1;
        }

        if after.is_in_check(after.side_to_move) {
            self.checks += 1;
            if !has_legal_move(after) {
                self.checkmates += 1;
            }
        }
    }
}

pub fn perft(board: &Board, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in legal_moves(board) {
        perft_recurse(board, &mv, depth, 1, &mut total);
    }
    total
}

/// Per-root-move counts, in generator order.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(Move, PerftCounts)> {
    if depth == 0 {
        return Vec::new();
    }

    legal_moves(board)
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            perft_recurse(board, &mv, depth, 1, &mut counts);
            (mv, counts)
        })
        .collect()
}

fn perft_recurse(
    board: &Board,
    mv: &Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    let after = apply_unchecked(board, mv);

    if current_depth == search_depth {
        counts.record_leaf(mv, &after);
        return;
    }

    let mut subtree = PerftCounts::default();
    for child in legal_moves(&after) {
        perft_recurse(&after, &child, search_depth, current_depth + 1, &mut subtree);
    }
    counts.merge(subtree);
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).expect("perft FEN should parse")
    }

    #[test]
    fn depth_zero_counts_single_node() {
        assert_eq!(
            perft(&Board::new_game(), 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_node_counts() {
        let start = Board::new_game();
        let nodes: Vec<usize> = (1..=3).map(|depth| perft(&start, depth).nodes).collect();
        assert_eq!(nodes, vec![20, 400, 8902]);
    }

    #[test]
    fn start_position_depth_three_leaf_statistics() {
        assert_eq!(
            perft(&Board::new_game(), 3),
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_node_counts() {
        let position = board(KIWIPETE);
        let depth_one = perft(&position, 1);
        assert_eq!(depth_one.nodes, 48);
        assert_eq!(depth_one.captures, 8);
        assert_eq!(depth_one.castles, 2);
        assert_eq!(perft(&position, 2).nodes, 2039);
    }

    #[test]
    fn position_three_node_counts() {
        let position = board(POSITION_3);
        let nodes: Vec<usize> = (1..=3).map(|depth| perft(&position, depth).nodes).collect();
        assert_eq!(nodes, vec![14, 191, 2812]);
    }

    #[test]
    fn divide_sums_to_perft() {
        let position = board(KIWIPETE);
        let divided = perft_divide(&position, 2);
        assert_eq!(divided.len(), 48);
        let total: usize = divided.iter().map(|(_, counts)| counts.nodes).sum();
        assert_eq!(total, 2039);
    }
}
