//! Terminal board renderer.
//!
//! Draws a framed 8x8 grid with rank and file labels, from White's side or
//! flipped to Black's. Pieces are FEN letters by default, or Unicode glyphs.

use crate::game_state::{board::Board, chess_types::*};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// View from Black's side: rank 1 on top, file h on the left.
    pub flipped: bool,
    pub unicode: bool,
}

/// Render the board as framed text, without a trailing newline.
pub fn render_board(board: &Board, options: RenderOptions) -> String {
    let ranks: Vec<u8> = if options.flipped {
        (0..8).collect()
    } else {
        (0..8).rev().collect()
    };
    let files: Vec<u8> = if options.flipped {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };

    let mut out = String::new();
    out.push_str("  +-----------------+\n");

    for &rank in &ranks {
        out.push(char::from(b'1' + rank));
        out.push_str(" |");

        for &file in &files {
            out.push(' ');
            let square = Square::from_index_unchecked(rank * 8 + file);
            out.push(match board.piece_at(square) {
                Some(piece) if options.unicode => piece_to_unicode(piece),
                Some(piece) => piece.fen_char(),
                None => '.',
            });
        }

        out.push_str(" |\n");
    }

    out.push_str("  +-----------------+\n");
    out.push_str("   ");
    for &file in &files {
        out.push(' ');
        out.push(char::from(b'a' + file));
    }

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::{render_board, RenderOptions};
    use crate::game_state::board::Board;

    #[test]
    fn renders_start_position_from_white() {
        let text = render_board(&Board::new_game(), RenderOptions::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "8 | r n b q k b n r |");
        assert_eq!(lines[5], "4 | . . . . . . . . |");
        assert_eq!(lines[8], "1 | R N B Q K B N R |");
        assert_eq!(lines[10], "    a b c d e f g h");
    }

    #[test]
    fn flipped_view_reverses_ranks_and_files() {
        let options = RenderOptions {
            flipped: true,
            unicode: false,
        };
        let text = render_board(&Board::new_game(), options);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "1 | R N B K Q B N R |");
        assert_eq!(lines[8], "8 | r n b k q b n r |");
        assert_eq!(lines[10], "    h g f e d c b a");
    }

    #[test]
    fn unicode_glyphs_are_optional() {
        let options = RenderOptions {
            flipped: false,
            unicode: true,
        };
        let text = render_board(&Board::new_game(), options);
        assert!(text.contains("♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜"));
        assert!(text.contains("♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖"));
    }
}
