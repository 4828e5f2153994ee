//! Errors returned by the chess engine.
//!
//! `ChessError` is the single error type across the crate. Every variant is a
//! local, recoverable condition: the caller reports it and re-prompts, and the
//! engine state is left exactly as it was before the failing call.

use thiserror::Error;

use crate::game_state::outcome::Outcome;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The move is not in the legal set for the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Promotion kind missing for a promoting pawn move, or supplied for a
    /// move that does not promote.
    #[error("invalid promotion: {0}")]
    InvalidPromotion(String),

    #[error("ambiguous notation '{0}'")]
    AmbiguousNotation(String),

    #[error("unknown notation '{0}'")]
    UnknownNotation(String),

    #[error("game is already over: {0}")]
    GameOver(Outcome),

    #[error("no move to undo")]
    NoMoveToUndo,

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid transcript: {0}")]
    InvalidTranscript(String),
}
