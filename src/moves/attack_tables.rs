//! Attack bitboards for every piece kind.
//!
//! Leaper attacks (knight, king, pawn) come from `const`-built tables. Slider
//! attacks trace rays against the live occupancy and stop on the first
//! blocker, which is included in the result.

use crate::game_state::chess_types::{Color, Square};

pub const KNIGHT_ATTACKS: [u64; 64] = generate_leaper_table(&[
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
]);

pub const KING_ATTACKS: [u64; 64] = generate_leaper_table(&[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
]);

pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_leaper_table(&[(-1, 1), (1, 1)]);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_leaper_table(&[(-1, -1), (1, -1)]);

const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL_STEPS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index() as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index() as usize]
}

/// Squares a pawn of `color` on `square` attacks diagonally.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index() as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square.index() as usize],
    }
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, occupancy, &ORTHOGONAL_STEPS)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, occupancy, &DIAGONAL_STEPS)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

fn slider_attacks(square: Square, occupancy: u64, steps: &[(i32, i32)]) -> u64 {
    steps.iter().fold(0u64, |acc, &(file_step, rank_step)| {
        acc | trace_ray(square, file_step, rank_step, occupancy)
    })
}

fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = square.file() as i32 + file_step;
    let mut rank = square.rank() as i32 + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn generate_leaper_table(deltas: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < deltas.len() {
            attacks |= set_if_valid(file + deltas[i].0, rank + deltas[i].1);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << ((rank as usize) * 8 + (file as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        assert_eq!(knight_attacks(sq("d4")).count_ones(), 8);
        assert_eq!(knight_attacks(sq("a1")).count_ones(), 2);
    }

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        assert_eq!(king_attacks(sq("a1")).count_ones(), 3);
        assert_eq!(king_attacks(sq("e4")).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_toward_the_enemy() {
        assert_eq!(
            pawn_attacks(Color::White, sq("e4")),
            sq("d5").mask() | sq("f5").mask()
        );
        assert_eq!(
            pawn_attacks(Color::Black, sq("a5")),
            sq("b4").mask()
        );
        assert_eq!(pawn_attacks(Color::White, sq("h8")), 0);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let attacks = rook_attacks(sq("a1"), sq("a4").mask());

        assert_ne!(attacks & sq("a4").mask(), 0);
        assert_eq!(attacks & sq("a5").mask(), 0);
        assert_eq!(rook_attacks(sq("d4"), 0).count_ones(), 14);
    }

    #[test]
    fn queen_combines_rook_and_bishop_rays() {
        assert_eq!(queen_attacks(sq("d4"), 0).count_ones(), 27);
        assert_eq!(bishop_attacks(sq("a1"), sq("c3").mask()).count_ones(), 2);
    }
}
