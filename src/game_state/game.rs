//! Game state machine.
//!
//! `Game` owns the starting position, the current board and the move record.
//! It is the single entry point for playing moves: text or `Move` values are
//! resolved, validated and applied here. The `Outcome` is derived from the
//! board and record whenever either changes, and read back from that cache.

use tracing::{debug, info};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};
use crate::game_state::game_record::{GameRecord, RecordEntry};
use crate::game_state::outcome::{GameStatus, Outcome};
use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_apply::{self, apply};
use crate::move_generation::move_generator::{has_legal_move, legal_moves};
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::{looks_like_long_algebraic, parse_long_algebraic};
use crate::utils::san::{format_san, parse_san};

#[derive(Debug, Clone)]
pub struct Game {
    starting_board: Board,
    board: Board,
    record: GameRecord,
    /// Always equal to `evaluate_outcome()` for the current board and record.
    outcome: Outcome,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::new_game())
    }

    pub fn from_board(board: Board) -> Self {
        let mut game = Self {
            starting_board: board.clone(),
            board,
            record: GameRecord::default(),
            outcome: Outcome::Ongoing,
        };
        game.outcome = game.evaluate_outcome();
        game
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::from_board(Board::from_fen(fen)?))
    }

    #[inline]
    pub fn current_board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn starting_board(&self) -> &Board {
        &self.starting_board
    }

    #[inline]
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board)
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.board.side_to_move)
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Derive the outcome from the current board and the record.
    fn evaluate_outcome(&self) -> Outcome {
        let board = &self.board;

        if !has_legal_move(board) {
            return if board.is_in_check(board.side_to_move) {
                Outcome::Checkmate {
                    winner: board.side_to_move.opposite(),
                }
            } else {
                Outcome::Stalemate
            };
        }

        if board.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
            return Outcome::DrawByFiftyMove;
        }

        let seen = self.record.occurrences(board.position_key()) + 1;
        if seen >= REPETITION_LIMIT {
            return Outcome::DrawByRepetition;
        }

        if is_insufficient_material(board) {
            return Outcome::DrawByInsufficientMaterial;
        }

        Outcome::Ongoing
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.outcome().status()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Play a move given as SAN (`Nf3`, `O-O`) or coordinates (`g1f3`).
    pub fn submit_move(&mut self, text: &str) -> ChessResult<Outcome> {
        self.ensure_ongoing()?;
        let mv = self.resolve_notation(text)?;
        self.commit(mv)
    }

    /// Play a `Move` value; it must equal one of `legal_moves()`.
    pub fn submit(&mut self, mv: Move) -> ChessResult<Outcome> {
        self.ensure_ongoing()?;
        self.commit(mv)
    }

    /// Take back the last move.
    pub fn undo(&mut self) -> ChessResult<()> {
        let previous = legal_move_apply::undo(&mut self.record)?;
        debug!(fen = %previous.to_fen(), plies = self.record.len(), "undid move");
        self.board = previous;
        self.outcome = self.evaluate_outcome();
        Ok(())
    }

    /// SAN of every recorded move, in play order.
    pub fn move_history_san(&self) -> ChessResult<Vec<String>> {
        self.record
            .entries()
            .iter()
            .map(|entry| format_san(&entry.mv, &entry.board_before))
            .collect()
    }

    /// Resolve text against the current position without playing it.
    pub fn resolve_notation(&self, text: &str) -> ChessResult<Move> {
        match parse_san(text, &self.board) {
            Ok(mv) => Ok(mv),
            Err(san_error) if looks_like_long_algebraic(text) => {
                parse_long_algebraic(text, &self.board).map_err(|coordinate_error| {
                    match san_error {
                        ChessError::AmbiguousNotation(_) => san_error,
                        _ => coordinate_error,
                    }
                })
            }
            Err(san_error) => Err(san_error),
        }
    }

    fn ensure_ongoing(&self) -> ChessResult<()> {
        let outcome = self.outcome();
        if outcome.is_terminal() {
            return Err(ChessError::GameOver(outcome));
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move) -> ChessResult<Outcome> {
        let next = apply(&self.board, &mv)?;
        let before = std::mem::replace(&mut self.board, next);
        self.record.push(RecordEntry::new(before, mv));

        let outcome = self.evaluate_outcome();
        self.outcome = outcome;
        debug!(%mv, fen = %self.board.to_fen(), "applied move");
        if outcome.is_terminal() {
            info!(%outcome, plies = self.record.len(), "game finished");
        }
        Ok(outcome)
    }
}

/// Neither side can mate by any sequence of legal moves.
///
/// Covers bare kings, a single minor piece, and any number of bishops that
/// all stand on squares of one color.
pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
        .iter()
        .any(|&kind| {
            board.piece_bitboard(Color::White, kind) | board.piece_bitboard(Color::Black, kind)
                != 0
        });
    if heavy_or_pawn {
        return false;
    }

    let knights = board.piece_bitboard(Color::White, PieceKind::Knight)
        | board.piece_bitboard(Color::Black, PieceKind::Knight);
    let bishops = board.piece_bitboard(Color::White, PieceKind::Bishop)
        | board.piece_bitboard(Color::Black, PieceKind::Bishop);
    let minors = knights.count_ones() + bishops.count_ones();

    if minors <= 1 {
        return true;
    }
    if knights != 0 {
        return false;
    }

    let mut bishop_squares = squares_of(bishops);
    let first_is_dark = bishop_squares.next().map(Square::is_dark);
    bishop_squares.all(|sq| Some(sq.is_dark()) == first_is_dark)
}
