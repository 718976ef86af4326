//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the board and piece simulation. It has **no** UI, timer
//! or I/O dependencies; a driver feeds it ticks and a front-end feeds it
//! commands.
//!
//! # Module Structure
//!
//! - [`board`]: flat grid of [`Cell`](types::Cell)s with row clear/shift primitives
//! - [`pieces`]: the seven-kind shape table as `(dx, dy)` offsets
//! - [`game_state`]: [`GameSession`], the spawn/fall/lock/clear state machine
//! - [`rng`]: uniform and scripted piece sources
//! - [`config`]: board size, spawn anchor and scoring tunables
//! - [`snapshot`]: serialisable views for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at column 4, row 0 in rotation state 0
//! - Rotation steps through the kind's states in place; no wall kicks
//! - Each cleared row scores a flat 10 points
//! - The game ends when a newly spawned piece overlaps the stack
//!
//! # Example
//!
//! ```
//! use gridfall_core::{GameConfig, GameSession, ScriptedPieces};
//! use gridfall_core::types::{Direction, PieceKind, Phase};
//!
//! let mut game =
//!     GameSession::with_source(GameConfig::default(), ScriptedPieces::repeat(PieceKind::O))
//!         .unwrap();
//! game.start_game();
//! assert_eq!(game.active_cells().as_slice(), &[4, 5, 14, 15]);
//!
//! game.shift(Direction::Left);
//! game.tick();
//! assert_eq!(game.active_cells().as_slice(), &[13, 14, 23, 24]);
//! assert_eq!(game.phase(), Phase::Falling);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use gridfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError};
pub use config::{ConfigError, GameConfig, MAX_BOARD_SIDE};
pub use game_state::{CoreLastEvent, FallingPiece, GameSession, Step};
pub use pieces::{get_shape, rotation_count, rotation_states};
pub use rng::{PieceSource, ScriptedPieces, SimpleRng, UniformPieces};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
