//! Square name conversions.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and `Square`
//! values for the FEN, SAN and coordinate-notation layers.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert a coordinate such as "e4" to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = file_from_char(bytes[0] as char)
        .ok_or_else(|| ChessError::InvalidSquare(format!("bad file in '{square}'")))?;
    let rank = rank_from_char(bytes[1] as char)
        .ok_or_else(|| ChessError::InvalidSquare(format!("bad rank in '{square}'")))?;

    Square::new(file, rank)
}

/// `'a'..='h'` to `0..=7`.
#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    ('a'..='h').contains(&ch).then(|| ch as u8 - b'a')
}

/// `'1'..='8'` to `0..=7`.
#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    ('1'..='8').contains(&ch).then(|| ch as u8 - b'1')
}

#[inline]
pub fn file_to_char(file: u8) -> char {
    char::from(b'a' + file)
}

#[inline]
pub fn rank_to_char(rank: u8) -> char {
    char::from(b'1' + rank)
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, file_from_char, file_to_char, rank_from_char, rank_to_char};

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse").index(), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse").index(), 63);
        let e4 = algebraic_to_square("e4").expect("e4 should parse");
        assert_eq!(e4.to_string(), "e4");
        assert_eq!((file_to_char(e4.file()), rank_to_char(e4.rank())), ('e', '4'));
    }

    #[test]
    fn rejects_malformed_squares() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(algebraic_to_square("e44").is_err());
        assert_eq!(file_from_char('H'), None);
        assert_eq!(rank_from_char('0'), None);
    }
}
