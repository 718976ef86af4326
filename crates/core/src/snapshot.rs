//! Read-only views handed to renderers and tooling.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{Cell, PieceKind, Phase, MAX_PIECE_CELLS};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    pub col: i32,
    pub row: i32,
    /// Absolute board indices covered by the piece.
    pub cells: ArrayVec<usize, MAX_PIECE_CELLS>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major locked cells; the falling piece is not included.
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub phase: Phase,
    pub score: u32,
    pub lines: u32,
    /// Set by the driver; the session itself never pauses.
    pub paused: bool,
}

impl GameSnapshot {
    /// Cell at `(col, row)`, with the falling piece drawn over locked cells.
    pub fn cell_at(&self, col: u16, row: u16) -> Cell {
        if col >= self.width || row >= self.height {
            return Cell::Empty;
        }
        let index = row as usize * self.width as usize + col as usize;
        if let Some(active) = &self.active {
            if active.cells.contains(&index) {
                return Cell::Occupied(active.kind);
            }
        }
        self.board.get(index).copied().unwrap_or_default()
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: None,
            phase: Phase::Idle,
            score: 0,
            lines: 0,
            paused: false,
        }
    }
}
