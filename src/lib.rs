//! Crate root module declarations for the CLI chess project.
//!
//! Exposes the rules engine (board, move generation, game state machine),
//! the notation and transcript utilities, and the terminal driver so the
//! binary, tests and benchmarks can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game;
    pub mod game_record;
    pub mod outcome;
    pub mod zobrist;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod move_generator;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_board;
    pub mod san;
    pub mod transcript;
}

pub mod cli {
    pub mod cli_config;
    pub mod cli_top;
}

pub use errors::{ChessError, ChessResult};
pub use game_state::game::Game;
pub use game_state::outcome::{GameStatus, Outcome};
pub use moves::chess_move::Move;
