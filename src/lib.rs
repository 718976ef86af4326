//! Gridfall (workspace facade crate).
//!
//! Re-exports the member crates under `gridfall::{core,driver,input,term,types}` so the
//! binary, benches and integration tests share one import surface.

pub use gridfall_core as core;
pub use gridfall_driver as driver;
pub use gridfall_input as input;
pub use gridfall_term as term;
pub use gridfall_types as types;
