//! Game outcome and lifecycle status.

use std::fmt;

use crate::game_state::chess_types::Color;

/// Result of evaluating a position together with its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    DrawByRepetition,
    DrawByFiftyMove,
    DrawByInsufficientMaterial,
}

/// Coarse lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
    Drawn,
}

impl Outcome {
    pub const fn status(self) -> GameStatus {
        match self {
            Outcome::Ongoing => GameStatus::Ongoing,
            Outcome::Checkmate { .. } => GameStatus::Checkmate,
            Outcome::Stalemate => GameStatus::Stalemate,
            Outcome::DrawByRepetition
            | Outcome::DrawByFiftyMove
            | Outcome::DrawByInsufficientMaterial => GameStatus::Drawn,
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// PGN result token.
    pub const fn result_tag(self) -> &'static str {
        match self {
            Outcome::Ongoing => "*",
            Outcome::Checkmate {
                winner: Color::White,
            } => "1-0",
            Outcome::Checkmate {
                winner: Color::Black,
            } => "0-1",
            Outcome::Stalemate
            | Outcome::DrawByRepetition
            | Outcome::DrawByFiftyMove
            | Outcome::DrawByInsufficientMaterial => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::DrawByRepetition => write!(f, "draw by threefold repetition"),
            Outcome::DrawByFiftyMove => write!(f, "draw by fifty-move rule"),
            Outcome::DrawByInsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GameStatus, Outcome};
    use crate::game_state::chess_types::Color;

    #[test]
    fn draws_share_one_status() {
        for outcome in [
            Outcome::DrawByRepetition,
            Outcome::DrawByFiftyMove,
            Outcome::DrawByInsufficientMaterial,
        ] {
            assert_eq!(outcome.status(), GameStatus::Drawn);
            assert!(outcome.is_terminal());
            assert_eq!(outcome.result_tag(), "1/2-1/2");
        }
    }

    #[test]
    fn checkmate_result_names_winner() {
        let white_wins = Outcome::Checkmate {
            winner: Color::White,
        };
        assert_eq!(white_wins.result_tag(), "1-0");
        assert_eq!(white_wins.status(), GameStatus::Checkmate);
        assert!(!Outcome::Ongoing.is_terminal());
        assert_eq!(Outcome::Ongoing.result_tag(), "*");
    }
}
