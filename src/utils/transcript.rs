//! PGN-style game transcripts.
//!
//! Writing emits the tag pairs plus numbered SAN movetext. Reading strips
//! comments, variations, move numbers and result tokens, then replays every
//! SAN token through `Game::submit_move`, so a transcript can never produce a
//! position the rules would not reach.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::game_state::game::Game;
use crate::utils::san::format_san;

const EVENT_NAME: &str = "CLI Chess";

/// Transcript of `game`, dated today.
pub fn write_transcript(game: &Game) -> ChessResult<String> {
    write_transcript_dated(game, Local::now().date_naive())
}

pub fn write_transcript_dated(game: &Game, date: NaiveDate) -> ChessResult<String> {
    let mut headers: Vec<(&str, String)> = vec![
        ("Event", EVENT_NAME.to_owned()),
        ("Site", "Local".to_owned()),
        ("Date", date.format("%Y.%m.%d").to_string()),
        ("White", "White".to_owned()),
        ("Black", "Black".to_owned()),
        ("Result", game.outcome().result_tag().to_owned()),
    ];

    if game.starting_board() != &Board::new_game() {
        headers.push(("SetUp", "1".to_owned()));
        headers.push(("FEN", game.starting_board().to_fen()));
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_tag_value(value)));
    }
    out.push('\n');

    let entries = game.record().entries();
    let mut movetext_parts = Vec::<String>::with_capacity(entries.len() + 1);
    for (ply, entry) in entries.iter().enumerate() {
        let before = &entry.board_before;
        let san = format_san(&entry.mv, before)?;
        match before.side_to_move {
            Color::White => movetext_parts.push(format!("{}. {}", before.fullmove_number, san)),
            Color::Black if ply == 0 => {
                movetext_parts.push(format!("{}... {}", before.fullmove_number, san))
            }
            Color::Black => movetext_parts.push(san),
        }
    }
    movetext_parts.push(game.outcome().result_tag().to_owned());

    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    Ok(out)
}

/// Rebuild a game from transcript text.
pub fn read_transcript(text: &str) -> ChessResult<Game> {
    let mut setup = false;
    let mut fen: Option<String> = None;
    let mut movetext_lines = Vec::<&str>::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') {
            let (key, value) = parse_tag_line(trimmed)?;
            match key.as_str() {
                "SetUp" => setup = value == "1",
                "FEN" => fen = Some(value),
                _ => {}
            }
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let mut game = match fen {
        Some(fen) => Game::from_fen(&fen)?,
        None if setup => {
            return Err(ChessError::InvalidTranscript(
                "SetUp is 1 but the FEN tag is missing".to_owned(),
            ))
        }
        None => Game::new(),
    };

    let movetext = strip_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        let token = strip_move_number(token);
        if token.is_empty() || token.starts_with('$') {
            continue;
        }
        if is_result_token(token) {
            break;
        }

        game.submit_move(token).map_err(|err| {
            ChessError::InvalidTranscript(format!(
                "move {} '{}': {}",
                game.record().len() + 1,
                token,
                err
            ))
        })?;
    }

    debug!(plies = game.record().len(), "replayed transcript");
    Ok(game)
}

fn parse_tag_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidTranscript(format!("bad tag pair: {line}"));

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.trim().split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    Ok((key.to_owned(), unescape_tag_value(value)))
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' if brace_depth == 0 => paren_depth = paren_depth.saturating_add(1),
            ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
        // Comments may sit between tokens without surrounding spaces.
        if ch == '}' || ch == ')' {
            out.push(' ');
        }
    }

    out
}

/// Drop a leading `12.` or `12...`, which may be glued to the move.
fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return token;
    }
    let rest = &token[digits..];
    if rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_tag_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Reverse `escape_tag_value`: a backslash takes the next character literally.
fn unescape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.extend(chars.next()),
            _ => out.push(ch),
        }
    }
    out
}
