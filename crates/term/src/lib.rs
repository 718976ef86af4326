//! Terminal front-end for the board.
//!
//! Renders game snapshots into a simple framebuffer that is flushed to the
//! terminal through crossterm. No widget toolkit is involved.
//!
//! - Keep `core` deterministic and testable
//! - Draw each board cell 2 characters wide to offset the glyph aspect ratio
//! - Only changed runs are written after the first frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use gridfall_core as core;
pub use gridfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
