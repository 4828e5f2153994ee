use crate::game_state::board::Board;
use crate::moves::chess_move::Move;

/// One played move together with the position it was played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// Zobrist key of `board_before`.
    pub position_key: u64,
    pub mv: Move,
    pub board_before: Board,
}

impl RecordEntry {
    pub fn new(board_before: Board, mv: Move) -> Self {
        Self {
            position_key: board_before.position_key(),
            mv,
            board_before,
        }
    }
}

/// Append-only move history; only undo removes entries, from the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    entries: Vec<RecordEntry>,
}

impl GameRecord {
    #[inline]
    pub fn push(&mut self, entry: RecordEntry) {
        self.entries.push(entry);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<RecordEntry> {
        self.entries.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// How many recorded before-positions share `position_key`.
    pub fn occurrences(&self, position_key: u64) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.position_key == position_key)
            .count()
    }
}
