//! Terminal front-end and command loop.
//!
//! Reads one command per line, plays moves through `Game`, and prints the
//! board after every change. Engine errors are reported and the loop keeps
//! going; only I/O failures on the terminal itself end it.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cli::cli_config::CliConfig;
use crate::errors::ChessError;
use crate::game_state::game::Game;
use crate::utils::render_board::{render_board, RenderOptions};
use crate::utils::san::format_san;
use crate::utils::transcript::{read_transcript, write_transcript};

const HELP_TEXT: &str = "\
Commands:
  <move>        Make a move in SAN (Nf3, O-O) or coordinates (e2e4).
  undo          Undo the last move.
  legal         List all legal moves.
  show          Print the board.
  fen           Print the current position as FEN.
  save <file>   Save the game as a transcript.
  load <file>   Load a transcript, replacing the current game.
  flip          Flip the board orientation.
  help          Show this message.
  quit / exit   Leave the game.";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("cannot read {}: {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Chess(#[from] ChessError),
}

pub fn run_stdio_loop(config: &CliConfig) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut cli = CliState::from_config(config)?;

    writeln!(stdout, "Welcome to CLI Chess")?;
    writeln!(stdout, "Type 'help' for available commands.")?;
    cli.print_board(&mut stdout)?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout, "\nExiting.")?;
            break;
        };
        let should_quit = cli.handle_command(&line?, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct CliState {
    game: Game,
    render: RenderOptions,
}

impl CliState {
    fn new(game: Game, render: RenderOptions) -> Self {
        Self { game, render }
    }

    fn from_config(config: &CliConfig) -> Result<Self, CliError> {
        let game = match (&config.load, &config.fen) {
            (Some(path), _) => load_game(path)?,
            (None, Some(fen)) => Game::from_fen(fen)?,
            (None, None) => Game::new(),
        };
        let render = RenderOptions {
            flipped: config.flip,
            unicode: config.unicode,
        };
        Ok(Self::new(game, render))
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();
        debug!(command = %trimmed, "terminal command");

        match cmd.as_str() {
            "quit" | "exit" => {
                writeln!(out, "Goodbye.")?;
                return Ok(true);
            }
            "help" => writeln!(out, "{HELP_TEXT}")?,
            "show" => self.print_board(out)?,
            "fen" => writeln!(out, "{}", self.game.current_board().to_fen())?,
            "flip" => {
                self.render.flipped = !self.render.flipped;
                self.print_board(out)?;
            }
            "undo" => match self.game.undo() {
                Ok(()) => {
                    writeln!(out, "Last move undone.")?;
                    self.print_board(out)?;
                }
                Err(err) => writeln!(out, "Error: {err}")?,
            },
            "legal" => self.print_legal_moves(out)?,
            "save" => match parts.next() {
                Some(file) => self.save(Path::new(file), out)?,
                None => writeln!(out, "Usage: save <file>")?,
            },
            "load" => match parts.next() {
                Some(file) => self.load(Path::new(file), out)?,
                None => writeln!(out, "Usage: load <file>")?,
            },
            _ => self.play(trimmed, out)?,
        }

        Ok(false)
    }

    fn play(&mut self, text: &str, out: &mut impl Write) -> io::Result<()> {
        match self.game.submit_move(text) {
            Ok(_) => self.print_board(out),
            Err(err) => writeln!(out, "Error: {err}"),
        }
    }

    fn print_legal_moves(&self, out: &mut impl Write) -> io::Result<()> {
        let board = self.game.current_board();
        let sans: Result<Vec<String>, ChessError> = self
            .game
            .legal_moves()
            .iter()
            .map(|mv| format_san(mv, board))
            .collect();

        match sans {
            Ok(sans) if sans.is_empty() => writeln!(out, "No legal moves."),
            Ok(sans) => writeln!(out, "Legal moves: {}", sans.join(" ")),
            Err(err) => writeln!(out, "Error: {err}"),
        }
    }

    fn save(&self, path: &Path, out: &mut impl Write) -> io::Result<()> {
        let text = match write_transcript(&self.game) {
            Ok(text) => text,
            Err(err) => return writeln!(out, "Error: {err}"),
        };

        match fs::write(path, text) {
            Ok(()) => {
                info!(path = %path.display(), plies = self.game.record().len(), "saved transcript");
                writeln!(out, "Game saved to {}", path.display())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not save transcript");
                writeln!(out, "Error: cannot write {}: {err}", path.display())
            }
        }
    }

    fn load(&mut self, path: &Path, out: &mut impl Write) -> io::Result<()> {
        match load_game(path) {
            Ok(game) => {
                self.game = game;
                writeln!(out, "Loaded game from {}", path.display())?;
                self.print_board(out)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not load transcript");
                writeln!(out, "Error: {err}")
            }
        }
    }

    fn print_board(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", render_board(self.game.current_board(), self.render))?;
        writeln!(out)?;
        writeln!(out, "Turn: {}", self.game.side_to_move())?;

        if self.game.is_check() {
            writeln!(out, "Check!")?;
        }
        let outcome = self.game.outcome();
        if outcome.is_terminal() {
            writeln!(out, "Game over: {} ({})", outcome, outcome.result_tag())?;
        }
        writeln!(out)
    }
}

fn load_game(path: &Path) -> Result<Game, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let game = read_transcript(&text)?;
    info!(path = %path.display(), plies = game.record().len(), "loaded transcript");
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::{CliState, RenderOptions};
    use crate::cli::cli_config::CliConfig;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game::Game;

    fn run(state: &mut CliState, line: &str) -> (bool, String) {
        let mut out = Vec::<u8>::new();
        let quit = state
            .handle_command(line, &mut out)
            .expect("writing to a buffer should not fail");
        (quit, String::from_utf8(out).expect("output should be UTF-8"))
    }

    fn fresh() -> CliState {
        CliState::new(Game::new(), RenderOptions::default())
    }

    #[test]
    fn moves_in_both_notations_update_board() {
        let mut state = fresh();

        let (quit, text) = run(&mut state, "e4");
        assert!(!quit);
        assert!(text.contains("Turn: Black"));

        let (_, text) = run(&mut state, "e7e5");
        assert!(text.contains("Turn: White"));
        assert_eq!(state.game.record().len(), 2);
    }

    #[test]
    fn errors_are_reported_and_state_kept() {
        let mut state = fresh();

        let (quit, text) = run(&mut state, "Qh5");
        assert!(!quit);
        assert!(text.starts_with("Error: unknown notation 'Qh5'"));

        let (_, text) = run(&mut state, "undo");
        assert!(text.contains("Error: no move to undo"));
        assert_eq!(state.game.side_to_move(), Color::White);
        assert!(state.game.record().is_empty());
    }

    #[test]
    fn fools_mate_reports_check_and_result() {
        let mut state = fresh();
        for mv in ["f3", "e5", "g4"] {
            run(&mut state, mv);
        }
        let (_, text) = run(&mut state, "Qh4#");
        assert!(text.contains("Check!"));
        assert!(text.contains("Game over: checkmate, Black wins (0-1)"));

        let (_, text) = run(&mut state, "a3");
        assert!(text.contains("Error: game is already over"));
    }

    #[test]
    fn legal_lists_san_and_undo_takes_back() {
        let mut state = fresh();
        let (_, text) = run(&mut state, "legal");
        let listed: Vec<&str> = text
            .trim()
            .trim_start_matches("Legal moves:")
            .split_whitespace()
            .collect();
        assert_eq!(listed.len(), 20);
        assert!(listed.contains(&"Nf3"));

        run(&mut state, "d4");
        let (_, text) = run(&mut state, "undo");
        assert!(text.starts_with("Last move undone."));
        assert_eq!(state.game.current_board(), Game::new().current_board());
    }

    #[test]
    fn display_commands() {
        let mut state = fresh();

        let (_, text) = run(&mut state, "fen");
        assert_eq!(
            text.trim(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );

        let (_, text) = run(&mut state, "flip");
        assert!(state.render.flipped);
        assert!(text.contains("h g f e d c b a"));

        let (_, text) = run(&mut state, "help");
        assert!(text.contains("save <file>"));

        let (_, text) = run(&mut state, "save");
        assert_eq!(text.trim(), "Usage: save <file>");

        let (quit, text) = run(&mut state, "  QUIT ");
        assert!(quit);
        assert_eq!(text.trim(), "Goodbye.");
    }

    #[test]
    fn save_then_load_restores_game() {
        let path = std::env::temp_dir().join(format!("cli_chess_test_{}.pgn", std::process::id()));
        let file = path.to_str().expect("temp path should be UTF-8");

        let mut state = fresh();
        for mv in ["e4", "c5", "Nf3"] {
            run(&mut state, mv);
        }
        let (_, text) = run(&mut state, &format!("save {file}"));
        assert!(text.starts_with("Game saved to"));

        let mut other = fresh();
        let (_, text) = run(&mut other, &format!("load {file}"));
        assert!(text.starts_with("Loaded game from"));
        assert_eq!(other.game.current_board(), state.game.current_board());
        assert_eq!(other.game.record().len(), 3);

        std::fs::remove_file(&path).expect("temp transcript should be removable");

        let (_, text) = run(&mut other, &format!("load {file}"));
        assert!(text.starts_with("Error: cannot read"));
        assert_eq!(other.game.record().len(), 3);
    }

    #[test]
    fn config_seeds_position_and_view() {
        let config = CliConfig {
            fen: Some("4k3/8/8/8/8/8/8/4K3 b - - 0 1".to_owned()),
            load: None,
            flip: true,
            unicode: true,
        };
        let mut state = CliState::from_config(&config).expect("config should build a game");
        assert_eq!(state.game.side_to_move(), Color::Black);
        assert!(state.render.flipped);

        let (_, text) = run(&mut state, "show");
        assert!(text.contains('♚'));
        assert!(text.contains("Game over: draw by insufficient material (1/2-1/2)"));

        let bad = CliConfig {
            fen: Some("not a fen".to_owned()),
            ..CliConfig::default()
        };
        assert!(CliState::from_config(&bad).is_err());
    }
}
