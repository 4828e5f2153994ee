//! Command-line configuration for the terminal driver.

use std::path::PathBuf;

use clap::Parser;

/// Two-player chess in the terminal.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct CliConfig {
    /// Start from this FEN instead of the standard position.
    #[arg(long, env = "CLI_CHESS_FEN")]
    pub fen: Option<String>,

    /// Replay a saved transcript before the first prompt. Takes precedence
    /// over `--fen`.
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Show the board from Black's side.
    #[arg(long, default_value_t = false)]
    pub flip: bool,

    /// Draw pieces with Unicode glyphs instead of letters.
    #[arg(long, default_value_t = false)]
    pub unicode: bool,
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn defaults_to_standard_ascii_game() {
        let config = CliConfig::try_parse_from(["cli_chess"]).expect("empty args should parse");
        assert_eq!(config.load, None);
        assert!(!config.flip);
        assert!(!config.unicode);
    }

    #[test]
    fn parses_all_flags() {
        let config = CliConfig::try_parse_from([
            "cli_chess",
            "--fen",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "--flip",
            "--unicode",
        ])
        .expect("flags should parse");
        assert_eq!(config.fen.as_deref(), Some("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(config.flip);
        assert!(config.unicode);

        let config = CliConfig::try_parse_from(["cli_chess", "--load", "game.pgn"])
            .expect("load should parse");
        assert_eq!(config.load, Some(PathBuf::from("game.pgn")));
    }
}
