//! Standard algebraic notation (SAN).
//!
//! Formatting adds disambiguation only when another piece of the same kind can
//! reach the destination, and appends `+`/`#` from the resulting position.
//! Parsing resolves text against the legal move set, so a successful parse
//! always yields a move that `apply` accepts.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_apply::apply_unchecked;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{has_legal_move, legal_moves};
use crate::moves::chess_move::*;
use crate::utils::algebraic::{algebraic_to_square, file_from_char, file_to_char, rank_from_char, rank_to_char};

/// Render a legal move in SAN, including check and mate suffixes.
pub fn format_san(mv: &Move, board: &Board) -> ChessResult<String> {
    let legal = legal_moves(board);
    if !legal.contains(mv) {
        return Err(ChessError::IllegalMove(format!(
            "{mv} is not legal in {}",
            board.to_fen()
        )));
    }

    let mut out = san_body(mv, board, &legal);

    let next = apply_unchecked(board, mv);
    if is_king_in_check(&next, next.side_to_move) {
        out.push(if has_legal_move(&next) { '+' } else { '#' });
    }

    Ok(out)
}

fn san_body(mv: &Move, board: &Board, legal: &[Move]) -> String {
    if mv.has_flag(FLAG_CASTLE_KINGSIDE) {
        return "O-O".to_owned();
    }
    if mv.has_flag(FLAG_CASTLE_QUEENSIDE) {
        return "O-O-O".to_owned();
    }

    let kind = board
        .piece_at(mv.from)
        .map_or(PieceKind::Pawn, |piece| piece.kind);
    let mut out = String::new();

    match kind.san_letter() {
        None => {
            if mv.is_capture() {
                out.push(file_to_char(mv.from.file()));
            }
        }
        Some(letter) => {
            out.push(letter);
            out.push_str(&disambiguation(mv, kind, board, legal));
        }
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&mv.to.to_string());

    if let Some(letter) = mv.promotion.and_then(PieceKind::san_letter) {
        out.push('=');
        out.push(letter);
    }

    out
}

/// File, rank, or full square of the origin when a rival piece shares the target.
fn disambiguation(mv: &Move, kind: PieceKind, board: &Board, legal: &[Move]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| other.to == mv.to && other.from != mv.from)
        .filter(|other| board.piece_at(other.from).map(|p| p.kind) == Some(kind))
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        return file_to_char(mv.from.file()).to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        return rank_to_char(mv.from.rank()).to_string();
    }
    mv.from.to_string()
}

/// Parsed shape of a SAN token before it is matched against legal moves.
#[derive(Debug, Default)]
struct SanPattern {
    kind: Option<PieceKind>,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Option<Square>,
    promotion: Option<PieceKind>,
    capture: bool,
    castle: Option<MoveFlags>,
}

/// Resolve SAN text to the unique legal move it names.
pub fn parse_san(text: &str, board: &Board) -> ChessResult<Move> {
    let unknown = || ChessError::UnknownNotation(text.to_owned());
    let pattern = parse_pattern(text).ok_or_else(unknown)?;
    let legal = legal_moves(board);

    let matches: Vec<Move> = legal
        .into_iter()
        .filter(|mv| pattern_matches(&pattern, mv, board))
        .collect();

    match matches.as_slice() {
        [] => Err(unknown()),
        [single] => Ok(*single),
        _ => Err(ChessError::AmbiguousNotation(text.to_owned())),
    }
}

fn parse_pattern(text: &str) -> Option<SanPattern> {
    let token = text
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));

    match token {
        "O-O" | "0-0" => {
            return Some(SanPattern {
                castle: Some(FLAG_CASTLE_KINGSIDE),
                ..SanPattern::default()
            })
        }
        "O-O-O" | "0-0-0" => {
            return Some(SanPattern {
                castle: Some(FLAG_CASTLE_QUEENSIDE),
                ..SanPattern::default()
            })
        }
        _ => {}
    }

    let mut chars: Vec<char> = token.chars().collect();
    let mut pattern = SanPattern::default();

    if let Some(kind) = chars.first().copied().and_then(PieceKind::from_san_letter) {
        pattern.kind = Some(kind);
        chars.remove(0);
    } else {
        pattern.kind = Some(PieceKind::Pawn);
    }

    // Promotion suffix: "=Q" or a bare trailing piece letter on a pawn move.
    if pattern.kind == Some(PieceKind::Pawn) {
        if let Some(&last) = chars.last() {
            if let Some(kind) = PieceKind::from_san_letter(last.to_ascii_uppercase()) {
                let explicit = chars.len() >= 2 && chars[chars.len() - 2] == '=';
                if explicit || last.is_ascii_uppercase() {
                    pattern.promotion = Some(kind);
                    chars.pop();
                    if explicit {
                        chars.pop();
                    }
                }
            }
        }
    }

    if chars.contains(&'x') {
        pattern.capture = true;
        chars.retain(|&c| c != 'x');
    }

    if chars.len() < 2 || chars.len() > 4 {
        return None;
    }
    let split = chars.len() - 2;
    let destination: String = chars[split..].iter().collect();
    pattern.to = Some(algebraic_to_square(&destination).ok()?);

    for &ch in &chars[..split] {
        if let Some(file) = file_from_char(ch) {
            if pattern.from_file.is_some() {
                return None;
            }
            pattern.from_file = Some(file);
        } else if let Some(rank) = rank_from_char(ch) {
            if pattern.from_rank.is_some() {
                return None;
            }
            pattern.from_rank = Some(rank);
        } else {
            return None;
        }
    }

    Some(pattern)
}

fn pattern_matches(pattern: &SanPattern, mv: &Move, board: &Board) -> bool {
    if let Some(castle) = pattern.castle {
        return mv.has_flag(castle);
    }
    if mv.is_castling() {
        return false;
    }

    let kind = board.piece_at(mv.from).map(|piece| piece.kind);
    if kind != pattern.kind || Some(mv.to) != pattern.to || mv.promotion != pattern.promotion {
        return false;
    }
    if pattern.capture && !mv.is_capture() {
        return false;
    }
    if pattern.from_file.is_some_and(|file| file != mv.from.file()) {
        return false;
    }
    if pattern.from_rank.is_some_and(|rank| rank != mv.from.rank()) {
        return false;
    }

    // A pawn written without an origin file is a push; captures name the file.
    if pattern.kind == Some(PieceKind::Pawn) && pattern.from_file.is_none() && mv.is_capture() {
        return false;
    }

    true
}
