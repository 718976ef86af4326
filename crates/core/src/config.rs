//! Session configuration
//!
//! Defaults come from the constants in `gridfall-types`; front-ends override
//! individual fields (the terminal binary maps them to command-line flags).

use std::fmt;

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, LINE_CLEAR_POINTS, MAX_PIECE_CELLS, SPAWN_COLUMN, SPAWN_ROW,
    TICK_INTERVAL_MS,
};

/// Largest accepted board side, in cells.
pub const MAX_BOARD_SIDE: u16 = 256;

/// Tunables for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub spawn_column: u16,
    pub spawn_row: u16,
    /// Points credited per cleared row.
    pub line_clear_points: u32,
    /// Gravity cadence used by the driver.
    pub tick_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            spawn_column: SPAWN_COLUMN,
            spawn_row: SPAWN_ROW,
            line_clear_points: LINE_CLEAR_POINTS,
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Board is too small to hold a spawned piece.
    BoardTooSmall { width: u16, height: u16 },
    /// A side exceeds [`MAX_BOARD_SIDE`].
    BoardTooLarge { width: u16, height: u16 },
    /// Spawn anchor leaves no room for a 4-wide piece.
    SpawnOutsideBoard { column: u16, row: u16 },
    ZeroTickInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooSmall { width, height } => write!(
                f,
                "board {width}x{height} is too small (minimum {MAX_PIECE_CELLS}x{MAX_PIECE_CELLS})"
            ),
            ConfigError::BoardTooLarge { width, height } => write!(
                f,
                "board {width}x{height} is too large (maximum {MAX_BOARD_SIDE}x{MAX_BOARD_SIDE})"
            ),
            ConfigError::SpawnOutsideBoard { column, row } => {
                write!(f, "spawn anchor ({column}, {row}) does not fit a piece")
            }
            ConfigError::ZeroTickInterval => write!(f, "tick interval must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Config for a board of the given size, spawning at the default column
    /// when it fits and otherwise as far right as a piece allows.
    pub fn with_board(width: u16, height: u16) -> Self {
        let max_col = width.saturating_sub(MAX_PIECE_CELLS as u16);
        Self {
            width,
            height,
            spawn_column: SPAWN_COLUMN.min(max_col),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = MAX_PIECE_CELLS as u16;
        if self.width < min || self.height < min {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_BOARD_SIDE || self.height > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.spawn_column as usize + MAX_PIECE_CELLS > self.width as usize
            || self.spawn_row as usize + MAX_PIECE_CELLS > self.height as usize
        {
            return Err(ConfigError::SpawnOutsideBoard {
                column: self.spawn_column,
                row: self.spawn_row,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
