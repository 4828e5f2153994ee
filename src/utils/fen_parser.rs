//! FEN-to-Board parser.
//!
//! Builds a fully-populated board from a Forsyth-Edwards Notation string and
//! rejects positions that break the board invariants: one king per color, no
//! pawns on the back ranks, the side not to move out of check, and an
//! en-passant target that a double push could have produced.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::algebraic::algebraic_to_square;

fn fen_error(message: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(message.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<Board> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| fen_error("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| fen_error("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| fen_error("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| fen_error("missing en-passant square"))?;
    // Clocks are optional; many hand-written FENs stop after the en-passant field.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(fen_error("extra trailing fields"));
    }

    let mut board = Board::default();

    parse_board(board_part, &mut board)?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_square = parse_en_passant_square(en_passant_part, board.side_to_move)?;
    board.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| fen_error(format!("invalid halfmove clock: {halfmove_part}")))?;
    board.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| fen_error(format!("invalid fullmove number: {fullmove_part}")))?;
    if board.fullmove_number == 0 {
        board.fullmove_number = 1;
    }

    validate_invariants(&board)?;
    validate_en_passant(&board)?;
    board.castling_rights &= castling_rights_supported_by_placement(&board);
    board.refresh_hash();

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut Board) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(fen_error("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(fen_error(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(fen_error("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| fen_error(format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(fen_error("board rank has too many files"));
            }

            board.place_piece(piece, Square::new(file, board_rank)?);
            file += 1;
        }

        if file != 8 {
            return Err(fen_error("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(fen_error(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(fen_error(format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str, side_to_move: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| fen_error(format!("invalid en-passant square: {en_passant_part}")))?;

    // The target sits behind a pawn of the side that just moved.
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if square.rank() != expected_rank {
        return Err(fen_error(format!(
            "en-passant square {en_passant_part} does not fit side to move"
        )));
    }

    Ok(Some(square))
}

fn validate_invariants(board: &Board) -> ChessResult<()> {
    for color in [Color::White, Color::Black] {
        let kings = board.piece_bitboard(color, PieceKind::King).count_ones();
        if kings != 1 {
            return Err(fen_error(format!("{color} must have exactly one king, found {kings}")));
        }
    }

    const BACK_RANKS: u64 = 0xFF00_0000_0000_00FF;
    let pawns = board.piece_bitboard(Color::White, PieceKind::Pawn)
        | board.piece_bitboard(Color::Black, PieceKind::Pawn);
    if pawns & BACK_RANKS != 0 {
        return Err(fen_error("pawns may not stand on rank 1 or 8"));
    }

    let waiting = board.side_to_move.opposite();
    if is_king_in_check(board, waiting) {
        return Err(fen_error(format!("{waiting} is in check but not to move")));
    }

    Ok(())
}

/// The target must be empty, with the pushed pawn in front of it and its
/// start square behind it vacated.
fn validate_en_passant(board: &Board) -> ChessResult<()> {
    let Some(target) = board.en_passant_square else {
        return Ok(());
    };

    let pusher = board.side_to_move.opposite();
    let pawn_square = target.offset(0, pusher.pawn_direction());
    let start_square = target.offset(0, -pusher.pawn_direction());

    let fits = board.piece_at(target).is_none()
        && pawn_square.and_then(|sq| board.piece_at(sq)) == Some(Piece::new(pusher, PieceKind::Pawn))
        && start_square.is_some_and(|sq| board.piece_at(sq).is_none());

    if !fits {
        return Err(fen_error(format!(
            "en-passant square {target} does not follow a {pusher} double push"
        )));
    }

    Ok(())
}

/// Drop rights whose king or rook is not on its home square.
fn castling_rights_supported_by_placement(board: &Board) -> CastlingRights {
    let home = |color: Color, kind: PieceKind, index: u8| {
        board.piece_bitboard(color, kind) & (1u64 << index) != 0
    };

    let mut supported = 0;
    if home(Color::White, PieceKind::King, 4) {
        if home(Color::White, PieceKind::Rook, 7) {
            supported |= CASTLE_WHITE_KINGSIDE;
        }
        if home(Color::White, PieceKind::Rook, 0) {
            supported |= CASTLE_WHITE_QUEENSIDE;
        }
    }
    if home(Color::Black, PieceKind::King, 60) {
        if home(Color::Black, PieceKind::Rook, 63) {
            supported |= CASTLE_BLACK_KINGSIDE;
        }
        if home(Color::Black, PieceKind::Rook, 56) {
            supported |= CASTLE_BLACK_QUEENSIDE;
        }
    }
    supported
}
