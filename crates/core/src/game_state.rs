//! Game state module - the piece simulator
//!
//! [`GameSession`] owns the board, the falling piece and the score, and runs
//! the `Idle -> Falling -> GameOver` state machine. Every command validates
//! its candidate placement with the collision check before committing, so
//! the board is only ever written by a lock or a line clear.
//!
//! The session has no notion of time or pause: an external driver calls
//! [`GameSession::tick`] at its own cadence.

use arrayvec::ArrayVec;

use crate::config::{ConfigError, GameConfig};
use crate::pieces::{get_shape, next_rotation, PieceShape};
use crate::rng::{PieceSource, UniformPieces};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::Board;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub kind: PieceKind,
    /// Index into the kind's rotation list.
    pub rotation: usize,
    /// Anchor column; offsets are added to this.
    pub col: i32,
    /// Anchor row.
    pub row: i32,
}

impl FallingPiece {
    pub fn new(kind: PieceKind, col: i32, row: i32) -> Self {
        Self {
            kind,
            rotation: 0,
            col,
            row,
        }
    }

    /// Offsets for the current rotation
    pub fn shape(&self) -> &'static PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Flat board index of the anchor.
    pub fn anchor_index(&self, width: u16) -> i64 {
        self.row as i64 * width as i64 + self.col as i64
    }

    /// Absolute flat index of every cell. May lie outside the board.
    pub fn cell_indices(&self, width: u16) -> ArrayVec<i64, MAX_PIECE_CELLS> {
        let w = width as i64;
        self.shape()
            .iter()
            .map(|&(dx, dy)| self.anchor_index(width) + dy as i64 * w + dx as i64)
            .collect()
    }

    /// Collision check: true if any cell is off the board or occupied.
    ///
    /// A cell counts as off the board when its flat index is outside
    /// `[0, width * height)` or its column is outside `[0, width)`, so a
    /// shape never wraps from one edge onto the other.
    pub fn collides(&self, board: &Board) -> bool {
        let width = board.width() as i32;
        let len = board.len() as i64;
        let w = width as i64;
        self.shape().iter().any(|&(dx, dy)| {
            let col = self.col + dx as i32;
            let index = self.row as i64 * w + col as i64 + dy as i64 * w;
            if index < 0 || index >= len || col < 0 || col >= width {
                return true;
            }
            board.get(index as usize).map_or(true, |cell| cell.is_occupied())
        })
    }

    /// Whether any cell already sits on the given edge column.
    pub fn touches_edge(&self, board: &Board, direction: Direction) -> bool {
        let edge = match direction {
            Direction::Left => 0,
            Direction::Right => board.width() as i32 - 1,
        };
        self.shape()
            .iter()
            .any(|&(dx, _)| self.col + dx as i32 == edge)
    }

    fn moved(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
            ..self
        }
    }

    fn rotated(self) -> Self {
        Self {
            rotation: next_rotation(self.kind, self.rotation),
            ..self
        }
    }
}

/// What a gravity step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No game in progress.
    Ignored,
    /// The piece moved down one row.
    Fell,
    /// The piece locked; lines were cleared and the next piece spawned
    /// (or the game ended).
    Locked,
}

/// Lock / line-clear / game-over notification, consumed by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLastEvent {
    /// Kind of the piece that was just locked, if the event came from a lock.
    pub locked: Option<PieceKind>,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// Score after the event.
    pub score: u32,
    /// Set exactly once per game, on the transition into `GameOver`.
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession<P: PieceSource = UniformPieces> {
    config: GameConfig,
    board: Board,
    active: Option<FallingPiece>,
    phase: Phase,
    score: u32,
    lines: u32,
    pieces: P,
    last_event: Option<CoreLastEvent>,
}

impl GameSession<UniformPieces> {
    /// Default-sized game drawing uniformly random pieces from `seed`.
    pub fn new(seed: u32) -> Self {
        let config = GameConfig::default();
        Self {
            board: Board::new(config.width, config.height),
            config,
            active: None,
            phase: Phase::Idle,
            score: 0,
            lines: 0,
            pieces: UniformPieces::new(seed),
            last_event: None,
        }
    }
}

impl<P: PieceSource> GameSession<P> {
    /// Session with explicit config and piece source.
    pub fn with_source(config: GameConfig, pieces: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.width, config.height),
            config,
            active: None,
            phase: Phase::Idle,
            score: 0,
            lines: 0,
            pieces,
            last_event: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_falling(&self) -> bool {
        self.phase == Phase::Falling
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this game.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn active(&self) -> Option<FallingPiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions between commands.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Absolute indices of the falling piece's cells.
    pub fn active_cells(&self) -> ArrayVec<usize, MAX_PIECE_CELLS> {
        let Some(active) = self.active else {
            return ArrayVec::new();
        };
        active
            .cell_indices(self.board.width())
            .into_iter()
            .filter(|&i| i >= 0 && (i as usize) < self.board.len())
            .map(|i| i as usize)
            .collect()
    }

    /// Reset the board and score and spawn the first piece.
    ///
    /// Accepted in every phase; from `Falling` it restarts the game.
    pub fn start_game(&mut self) -> bool {
        self.board.reset();
        self.score = 0;
        self.lines = 0;
        self.active = None;
        self.last_event = None;
        self.phase = Phase::Falling;
        self.spawn_piece()
    }

    /// Spawn a new piece at the spawn anchor.
    ///
    /// Returns false and enters `GameOver` if the spawn placement collides.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.pieces.next_piece();
        let piece = FallingPiece::new(
            kind,
            self.config.spawn_column as i32,
            self.config.spawn_row as i32,
        );

        if piece.collides(&self.board) {
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn end_game(&mut self) {
        self.active = None;
        self.phase = Phase::GameOver;
        let event = self.last_event.get_or_insert(CoreLastEvent {
            locked: None,
            lines_cleared: 0,
            line_clear_score: 0,
            score: self.score,
            game_over: false,
        });
        event.game_over = true;
        event.score = self.score;
    }

    /// Gravity step: move down one row, or lock if blocked.
    pub fn tick(&mut self) -> Step {
        let Some(active) = self.active.filter(|_| self.is_falling()) else {
            return Step::Ignored;
        };

        let candidate = active.moved(0, 1);
        if candidate.collides(&self.board) {
            self.lock_piece();
            return Step::Locked;
        }

        self.active = Some(candidate);
        Step::Fell
    }

    /// Player-requested one-row drop. Same rules as a gravity step.
    pub fn soft_drop(&mut self) -> Step {
        self.tick()
    }

    /// Try to move the active piece one column.
    pub fn shift(&mut self, direction: Direction) -> bool {
        let Some(active) = self.active.filter(|_| self.is_falling()) else {
            return false;
        };

        if active.touches_edge(&self.board, direction) {
            return false;
        }

        let candidate = active.moved(direction.dx(), 0);
        if candidate.collides(&self.board) {
            return false;
        }

        self.active = Some(candidate);
        true
    }

    /// Try to advance to the next rotation state in place.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active.filter(|_| self.is_falling()) else {
            return false;
        };

        let candidate = active.rotated();
        if candidate.collides(&self.board) {
            return false;
        }

        self.active = Some(candidate);
        true
    }

    /// Route an input command. Returns whether the state changed.
    ///
    /// `Pause` belongs to the driver and is ignored here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.shift(Direction::Left),
            GameAction::MoveRight => self.shift(Direction::Right),
            GameAction::SoftDrop => self.soft_drop() != Step::Ignored,
            GameAction::Rotate => self.rotate(),
            GameAction::Start => {
                self.start_game();
                true
            }
            GameAction::Pause => false,
        }
    }

    /// Lock the active piece onto the board, clear lines and spawn the next.
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        // Every committed placement passed the collision check, so each cell
        // is in range and empty.
        for index in active.cell_indices(self.board.width()) {
            self.board
                .occupy(index, active.kind)
                .expect("locked piece cell must be in range and empty");
        }

        let lines_cleared = self.clear_full_rows();
        let line_clear_score = lines_cleared * self.config.line_clear_points;
        self.lines += lines_cleared;
        self.score += line_clear_score;

        self.last_event = Some(CoreLastEvent {
            locked: Some(active.kind),
            lines_cleared,
            line_clear_score,
            score: self.score,
            game_over: false,
        });

        self.spawn_piece();
    }

    /// Clear every full row, re-checking a row index after each clear since
    /// the row above has just moved into it.
    fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut row = self.board.height() as usize;

        while row > 0 {
            let r = row - 1;
            if !self.board.row_is_full(r) {
                row -= 1;
                continue;
            }
            // `r < height` here, since `row_is_full` is false for bad rows.
            self.board
                .clear_row(r)
                .and_then(|_| self.board.shift_rows_down(r))
                .expect("full row index must be on the board");
            cleared += 1;
        }

        cleared
    }

    /// Take and clear the last lock/line-clear/game-over event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.active.map(|piece| ActiveSnapshot {
            kind: piece.kind,
            rotation: piece.rotation,
            col: piece.col,
            row: piece.row,
            cells: self.active_cells(),
        });
        out.phase = self.phase;
        out.score = self.score;
        out.lines = self.lines;
        out.paused = false;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
